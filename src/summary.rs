use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::record::LedgerRecord;
use crate::utils::months_between;

/// Currency all amounts are denominated in. Conversion is out of scope; the
/// stores are expected to hold a single currency.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Decimal places used when computing ratios before scaling to percentages.
const RATIO_SCALE: u32 = 4;

/// A calendar-month bucket, ordered chronologically and rendered as a
/// "Mon YYYY" label (e.g. "Feb 2025").
///
/// Keys in the monthly series are these rather than label strings so that
/// iteration (and therefore serialization) order is chronological, not
/// alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn label(&self) -> String {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!("{} {}", NAMES[(self.month - 1) as usize], self.year)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Chronologically ordered month-label -> amount mapping.
pub type MonthlySeries = BTreeMap<MonthKey, Decimal>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopExpense {
    pub name: String,
    pub amount: Decimal,
    /// ISO date of the expense, or "Unknown" when the record has none.
    pub date: String,
    pub category: String,
}

/// The normalized financial picture for one user over one window. Derived and
/// recomputed on every request, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub user_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub analysis_period: String,
    pub currency: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub savings_rate_percent: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
    pub monthly_income: MonthlySeries,
    pub monthly_expense: MonthlySeries,
    pub category_expenses: BTreeMap<String, Decimal>,
    pub top_expenses: Vec<TopExpense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_growth_percent: Option<Decimal>,
}

/// Builds the [`FinancialSummary`] for a user from raw records. Pure function:
/// identical inputs always yield an identical summary, and source records are
/// never mutated.
pub fn aggregate(
    user_id: i64,
    incomes: &[LedgerRecord],
    expenses: &[LedgerRecord],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> FinancialSummary {
    let monthly_income = bucket_by_month(incomes);
    let monthly_expense = bucket_by_month(expenses);

    let mut category_expenses: BTreeMap<String, Decimal> = BTreeMap::new();
    for expense in expenses {
        if let (Some(amount), Some(_)) = (expense.amount, expense.occurred_on) {
            *category_expenses
                .entry(expense.category_label().to_string())
                .or_insert(Decimal::ZERO) += amount;
        }
    }

    // Totals run over every record with an amount, independent of the monthly
    // breakdown (which additionally requires a date).
    let total_income: Decimal = incomes.iter().filter_map(|r| r.amount).sum();
    let total_expense: Decimal = expenses.iter().filter_map(|r| r.amount).sum();
    let net_balance = total_income - total_expense;

    let savings_rate_percent = if total_income > Decimal::ZERO {
        scaled_ratio(net_balance, total_income)
    } else {
        Decimal::ZERO
    };

    FinancialSummary {
        user_id,
        period_start,
        period_end,
        analysis_period: format!("Last {} months", months_between(period_start, period_end)),
        currency: CURRENCY_SYMBOL.to_string(),
        total_income,
        total_expense,
        net_balance,
        savings_rate_percent,
        income_count: incomes.len(),
        expense_count: expenses.len(),
        income_growth_percent: income_growth(&monthly_income),
        monthly_income,
        monthly_expense,
        category_expenses,
        top_expenses: top_expenses(expenses),
    }
}

fn bucket_by_month(records: &[LedgerRecord]) -> MonthlySeries {
    let mut series = MonthlySeries::new();
    for record in records {
        // Records missing an amount or a date are skipped, not errors.
        if let (Some(amount), Some(date)) = (record.amount, record.occurred_on) {
            *series.entry(MonthKey::of(date)).or_insert(Decimal::ZERO) += amount;
        }
    }
    series
}

fn top_expenses(expenses: &[LedgerRecord]) -> Vec<TopExpense> {
    let mut with_amount: Vec<&LedgerRecord> =
        expenses.iter().filter(|r| r.amount.is_some()).collect();
    // Stable sort: ties keep their original record order.
    with_amount.sort_by(|a, b| b.amount.cmp(&a.amount));

    with_amount
        .into_iter()
        .take(5)
        .map(|record| TopExpense {
            name: record.name.clone(),
            amount: record.amount.unwrap_or(Decimal::ZERO),
            date: record
                .occurred_on
                .map(|d| d.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            category: record.category_label().to_string(),
        })
        .collect()
}

/// Month-over-month income growth between the two most recent buckets,
/// as a percentage. Absent when fewer than two buckets exist or the earlier
/// bucket is zero (growth from nothing is undefined, not infinite).
fn income_growth(monthly_income: &MonthlySeries) -> Option<Decimal> {
    if monthly_income.len() < 2 {
        return None;
    }
    let mut values = monthly_income.values().rev();
    let latest = *values.next()?;
    let previous = *values.next()?;
    if previous > Decimal::ZERO {
        Some(scaled_ratio(latest - previous, previous))
    } else {
        None
    }
}

/// `numerator / denominator * 100`, with the quotient rounded half-up to four
/// decimal places before scaling (matching fixed-point percentage math).
fn scaled_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    (numerator / denominator)
        .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED
}
