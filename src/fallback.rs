use log::error;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{AnalysisError, Result};
use crate::insight::{InsightResult, NextMonthForecast, Priority, Provenance, Recommendation};
use crate::summary::FinancialSummary;
use crate::utils::{format_grouped, format_percent};

/// Forecasts spread each window total evenly across this many months.
const FORECAST_MONTHS: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Builds a rule-based [`InsightResult`] from an already-aggregated summary,
/// used whenever the generative provider is unavailable or fails. Cannot fail:
/// an internal computation error degrades to a result carrying only an error
/// description.
pub fn fallback_insight(summary: &FinancialSummary) -> InsightResult {
    match build_rule_based(summary) {
        Ok(result) => result,
        Err(err) => {
            error!("Rule-based analysis failed: {}", err);
            error_only_result()
        }
    }
}

fn build_rule_based(summary: &FinancialSummary) -> Result<InsightResult> {
    let income = summary.total_income;
    let expense = summary.total_expense;
    let savings = summary.net_balance;
    let rate = summary.savings_rate_percent;

    // Evaluated in this order on purpose: each later condition overwrites the
    // score, so the most severe applicable rule wins.
    let mut health_score: u8 = 70;
    if rate > Decimal::from(20) {
        health_score = 85;
    }
    if rate < Decimal::from(10) {
        health_score = 60;
    }
    if savings < Decimal::ZERO {
        health_score = 40;
    }

    let currency = &summary.currency;
    let key_insights = vec![
        format!("Total Income: {}{}", currency, format_grouped(income)),
        format!("Total Expenses: {}{}", currency, format_grouped(expense)),
        format!("Net Savings: {}{}", currency, format_grouped(savings)),
        format!("Savings Rate: {}%", format_percent(rate)),
    ];

    let recommendations = vec![
        Recommendation {
            title: "Configure Gemini AI".to_string(),
            description: "Set up your Gemini API key in the application properties for \
                          detailed AI-powered financial insights"
                .to_string(),
            priority: Priority::High,
        },
        Recommendation {
            title: "Track Expenses Regularly".to_string(),
            description: "Maintain consistent expense tracking to identify spending patterns"
                .to_string(),
            priority: Priority::Medium,
        },
    ];

    let next_month_forecast = Some(NextMonthForecast {
        expected_income: forecast_share(income)?,
        expected_expenses: forecast_share(expense)?,
        expected_savings: forecast_share(savings)?,
    });

    Ok(InsightResult {
        overall_assessment: "Basic financial analysis. Enable AI for personalized insights \
                             and recommendations."
            .to_string(),
        financial_health_score: health_score,
        key_insights,
        monthly_analysis: None,
        category_analysis: None,
        recommendations,
        risk_alerts: vec![],
        predicted_savings: None,
        next_month_forecast,
        text_analysis: None,
        error: None,
        provenance: Provenance::Fallback,
    })
}

/// One month's share of a window total, two decimal places, half-up.
fn forecast_share(total: Decimal) -> Result<Decimal> {
    total
        .checked_div(FORECAST_MONTHS)
        .map(|v| v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| AnalysisError::DataSource("forecast division overflowed".to_string()))
}

fn error_only_result() -> InsightResult {
    InsightResult {
        overall_assessment: String::new(),
        financial_health_score: 0,
        key_insights: vec![],
        monthly_analysis: None,
        category_analysis: None,
        recommendations: vec![],
        risk_alerts: vec![],
        predicted_savings: None,
        next_month_forecast: None,
        text_analysis: None,
        error: Some(
            "Unable to generate analysis. Please check your data and configuration.".to_string(),
        ),
        provenance: Provenance::Fallback,
    }
}
