use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// The window start `n` calendar months before `end`. Clamps day-of-month when
/// the target month is shorter (chrono's `checked_sub_months` behavior).
pub fn months_before(end: NaiveDate, n: u32) -> NaiveDate {
    end.checked_sub_months(Months::new(n)).unwrap_or(end)
}

/// Whole calendar months from `start` to `end`, ignoring days.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    use chrono::Datelike;
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// Formats an amount with thousands separators and exactly two decimal places,
/// e.g. `1234567.5` -> `"1,234,567.50"`.
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded);

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Formats a percentage with one decimal place, e.g. `40` -> `"40.0"`.
pub fn format_percent(rate: Decimal) -> String {
    let rounded = rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_months_before() {
        let end = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        assert_eq!(
            months_before(end, 6),
            NaiveDate::from_ymd_opt(2025, 2, 7).unwrap()
        );

        // Day clamping: Mar 31 minus one month lands on Feb 28.
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            months_before(end, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(dec!(0)), "0.00");
        assert_eq!(format_grouped(dec!(999)), "999.00");
        assert_eq!(format_grouped(dec!(1000)), "1,000.00");
        assert_eq!(format_grouped(dec!(100000)), "100,000.00");
        assert_eq!(format_grouped(dec!(1234567.5)), "1,234,567.50");
        assert_eq!(format_grouped(dec!(-45000.125)), "-45,000.13");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(40)), "40.0");
        assert_eq!(format_percent(dec!(5.25)), "5.3");
        assert_eq!(format_percent(dec!(-28.57)), "-28.6");
    }
}
