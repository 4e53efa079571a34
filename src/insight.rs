use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where an [`InsightResult`] came from. Internal bookkeeping only: the field
/// is excluded from (de)serialization so downstream consumers see one uniform
/// shape and never branch on origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provenance {
    /// Parsed from the generative provider's response.
    #[default]
    Provider,
    /// Computed by the deterministic rule-based analyzer.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Severity {
    Warning,
    Danger,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAnalysis {
    #[schemars(description = "Month with the highest savings")]
    pub best_month: String,

    #[schemars(description = "Month with the highest expenses")]
    pub worst_month: String,

    #[schemars(description = "Increasing/Decreasing/Stable")]
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysis {
    #[schemars(description = "Category where most money is spent")]
    pub top_spending_category: String,

    #[schemars(description = "Category where spending can be reduced")]
    pub recommended_category_to_reduce: String,

    #[schemars(description = "Estimated monthly amount that could be saved")]
    pub savings_opportunity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[schemars(description = "Actionable recommendation title")]
    pub title: String,

    #[schemars(description = "Detailed description of the recommendation")]
    pub description: String,

    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlert {
    #[schemars(description = "Alert category, e.g. 'Spending Alert'")]
    pub r#type: String,

    #[schemars(description = "Specific alert message")]
    pub message: String,

    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextMonthForecast {
    pub expected_income: Decimal,
    pub expected_expenses: Decimal,
    pub expected_savings: Decimal,
}

/// Structured financial advice for one user. Produced by parsing the provider's
/// response or computed by the rule-based fallback; both paths fill the same
/// shape, so a result is always structurally usable regardless of how it was
/// made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    #[schemars(description = "A brief 2-3 sentence assessment of the user's financial health")]
    pub overall_assessment: String,

    #[schemars(description = "Overall score from 0 (critical) to 100 (excellent)")]
    pub financial_health_score: u8,

    #[serde(default)]
    pub key_insights: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_analysis: Option<MonthlyAnalysis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_analysis: Option<CategoryAnalysis>,

    #[serde(default)]
    pub recommendations: Vec<Recommendation>,

    #[serde(default)]
    pub risk_alerts: Vec<RiskAlert>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_savings: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_month_forecast: Option<NextMonthForecast>,

    /// Raw provider output, preserved verbatim when it could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_analysis: Option<String>,

    /// Set only when the rule-based analyzer itself failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip)]
    #[schemars(skip)]
    pub provenance: Provenance,
}

impl InsightResult {
    /// Generates the JSON schema handed to the provider's structured-output
    /// configuration.
    pub fn response_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(InsightResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_is_invisible_on_the_wire() {
        let result = InsightResult {
            overall_assessment: "Solid".to_string(),
            financial_health_score: 80,
            key_insights: vec![],
            monthly_analysis: None,
            category_analysis: None,
            recommendations: vec![],
            risk_alerts: vec![],
            predicted_savings: None,
            next_month_forecast: None,
            text_analysis: None,
            error: None,
            provenance: Provenance::Fallback,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("provenance").is_none());
        assert!(json.get("monthlyAnalysis").is_none());

        let back: InsightResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.provenance, Provenance::Provider);
    }

    #[test]
    fn test_schema_generation_names_core_fields() {
        let schema = serde_json::to_string(&InsightResult::response_schema()).unwrap();
        assert!(schema.contains("overallAssessment"));
        assert!(schema.contains("financialHealthScore"));
        assert!(schema.contains("nextMonthForecast"));
        assert!(!schema.contains("provenance"));
    }
}
