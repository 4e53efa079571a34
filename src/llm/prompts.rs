// Prompts for the financial-analysis generation call.

use crate::summary::FinancialSummary;

/// Trivial prompt used to verify the provider is reachable before spending a
/// real request on it.
pub const PROBE_PROMPT: &str = "Hello, respond with 'OK' if you can hear me.";

/// The exact response shape the model must produce. Field names and ranges
/// here must stay in sync with [`crate::insight::InsightResult`].
const RESPONSE_TEMPLATE: &str = r#"{
  "overallAssessment": "A brief 2-3 sentence assessment of the user's financial health",
  "financialHealthScore": 85,
  "keyInsights": [
    "First key insight about spending patterns",
    "Second key insight about savings",
    "Third key insight about income trends"
  ],
  "monthlyAnalysis": {
    "bestMonth": "Month with highest savings",
    "worstMonth": "Month with highest expenses",
    "trend": "Increasing/Decreasing/Stable"
  },
  "categoryAnalysis": {
    "topSpendingCategory": "Category where most money is spent",
    "recommendedCategoryToReduce": "Category where spending can be reduced",
    "savingsOpportunity": 5000
  },
  "recommendations": [
    {
      "title": "Actionable recommendation title",
      "description": "Detailed description of the recommendation",
      "priority": "High/Medium/Low"
    }
  ],
  "riskAlerts": [
    {
      "type": "Spending Alert",
      "message": "Specific alert message",
      "severity": "Warning/Danger/Info"
    }
  ],
  "predictedSavings": 15000,
  "nextMonthForecast": {
    "expectedIncome": 50000,
    "expectedExpenses": 35000,
    "expectedSavings": 15000
  }
}"#;

const GUIDELINES: &str = r#"Guidelines:
1. All amounts should be in Indian Rupees (₹)
2. Be specific, actionable, and practical
3. Focus on Indian financial context and realities
4. Provide realistic numbers based on the data
5. financialHealthScore should be 0-100 based on savings rate, spending patterns, and consistency"#;

/// Builds the single analysis prompt: serialized summary, rigid response
/// template, formatting instructions, and domain guidance.
pub fn build_analysis_prompt(summary: &FinancialSummary, display_name: &str) -> String {
    match serde_json::to_string_pretty(summary) {
        Ok(json_data) => format!(
            "You are an expert financial advisor specializing in personal finance management.\n\
             Analyze the following financial data for {name} and provide detailed insights and \
             recommendations.\n\
             \n\
             IMPORTANT: You MUST respond with VALID JSON in the exact format specified below.\n\
             Do not include any markdown, code blocks, or additional text outside the JSON.\n\
             \n\
             Financial Data:\n\
             {data}\n\
             \n\
             Required JSON Response Format:\n\
             {template}\n\
             \n\
             {guidelines}",
            name = display_name,
            data = json_data,
            template = RESPONSE_TEMPLATE,
            guidelines = GUIDELINES,
        ),
        // Serialization of the summary has no fallible fields in practice, but
        // mirror the degraded prompt rather than failing the request over it.
        Err(_) => format!(
            "Analyze this financial data for {name} and provide insights in JSON format: \
             {data:?}\n\
             \n\
             Provide response in valid JSON with: overallAssessment, financialHealthScore (0-100), \
             keyInsights (array), recommendations (array), and nextMonthForecast.",
            name = display_name,
            data = summary,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;
    use chrono::NaiveDate;

    #[test]
    fn test_prompt_embeds_summary_and_template() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let summary = aggregate(42, &[], &[], start, end);

        let prompt = build_analysis_prompt(&summary, "Priya");
        assert!(prompt.contains("Priya"));
        assert!(prompt.contains("\"userId\": 42"));
        assert!(prompt.contains("financialHealthScore"));
        assert!(prompt.contains("Indian Rupees"));
        assert!(prompt.contains("Do not include any markdown"));
    }
}
