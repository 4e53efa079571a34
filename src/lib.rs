//! # Ledger Insights
//!
//! A library that turns raw time-stamped ledger records (incomes and expenses)
//! into a normalized financial summary and a structured insight report, backed
//! by a generative-text provider with a deterministic rule-based fallback.
//!
//! ## Core Concepts
//!
//! - **Ledger records**: immutable income/expense entries fetched through a
//!   resilient multi-strategy accessor that never fails outright
//! - **Financial summary**: monthly buckets, category totals, top expenses,
//!   growth trend, and savings rate, computed as a pure deterministic aggregation
//! - **Insight**: structured advice parsed from the provider's response, or
//!   computed by fixed rules whenever the provider is missing, unreachable, or
//!   misbehaving; both paths produce the same shape
//!
//! ## Example
//!
//! ```rust,ignore
//! use ledger_insights::*;
//! use std::sync::Arc;
//!
//! let config = GeminiConfig::new("api-key", "my-project");
//! let provider = Arc::new(GeminiClient::new(config)?);
//! let analyzer = FinancialAnalyzer::new(ledger_store, profile_store, provider);
//!
//! let report = analyzer.financial_analysis(user_id).await?;
//! if !report.success {
//!     // Still a fully populated analysis, just rule-based.
//!     println!("degraded: {:?}", report.error);
//! }
//! println!("score: {}", report.analysis.financial_health_score);
//! ```

pub mod accessor;
pub mod error;
pub mod fallback;
pub mod insight;
pub mod llm;
pub mod record;
pub mod store;
pub mod summary;
pub mod utils;

pub use accessor::fetch_records;
pub use error::{AnalysisError, Result};
pub use fallback::fallback_insight;
pub use insight::*;
pub use llm::*;
pub use record::{LedgerRecord, RecordKind, UserProfile};
pub use store::{LedgerStore, ProfileStore};
pub use summary::{aggregate, FinancialSummary, MonthKey, MonthlySeries, TopExpense, CURRENCY_SYMBOL};
pub use utils::*;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, info};
use serde::Serialize;
use std::sync::Arc;

/// Analysis always looks at the most recent six months of records.
pub const ANALYSIS_WINDOW_MONTHS: u32 = 6;

/// What a caller gets back from an analysis request. `success = false` means
/// the generative provider was skipped or failed and `analysis` is the
/// rule-based fallback; the analysis itself is always populated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub success: bool,
    pub analysis: InsightResult,
    pub raw_data: FinancialSummary,
    pub timestamp: DateTime<Utc>,
    pub model_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The analysis pipeline: record retrieval, aggregation, insight generation,
/// and degradation policy, wired to explicit store and provider seams.
pub struct FinancialAnalyzer {
    ledger: Arc<dyn LedgerStore>,
    profiles: Arc<dyn ProfileStore>,
    advisor: FinancialAdvisor,
}

impl FinancialAnalyzer {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        profiles: Arc<dyn ProfileStore>,
        provider: Arc<dyn InsightProvider>,
    ) -> Self {
        Self {
            ledger,
            profiles,
            advisor: FinancialAdvisor::new(provider),
        }
    }

    /// Analyzes the trailing six-month window ending today.
    pub async fn financial_analysis(&self, user_id: i64) -> Result<AnalysisReport> {
        let today = Utc::now().date_naive();
        let start = months_before(today, ANALYSIS_WINDOW_MONTHS);
        self.financial_analysis_for_window(user_id, start, today)
            .await
    }

    /// Analyzes an explicit window. The only hard failure is an unknown user;
    /// every provider-side problem degrades to the rule-based analysis with
    /// `success = false`.
    pub async fn financial_analysis_for_window(
        &self,
        user_id: i64,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<AnalysisReport> {
        info!("Generating financial analysis for user {}", user_id);

        let profile = self
            .profiles
            .get_by_id(user_id)
            .await?
            .ok_or(AnalysisError::ProfileNotFound(user_id))?;

        let incomes = fetch_records(
            self.ledger.as_ref(),
            user_id,
            RecordKind::Income,
            window_start,
            window_end,
        )
        .await;
        let expenses = fetch_records(
            self.ledger.as_ref(),
            user_id,
            RecordKind::Expense,
            window_start,
            window_end,
        )
        .await;
        debug!(
            "Fetched {} income and {} expense records for user {}",
            incomes.len(),
            expenses.len(),
            user_id
        );

        let summary = aggregate(user_id, &incomes, &expenses, window_start, window_end);

        let report = match self
            .advisor
            .generate_insight(&summary, profile.display_name_or_default())
            .await
        {
            Ok(raw) => AnalysisReport {
                success: true,
                analysis: normalize_response(&raw),
                raw_data: summary,
                timestamp: Utc::now(),
                model_used: self.advisor.model_name().to_string(),
                error: None,
            },
            Err(err) => {
                error!(
                    "Insight generation failed for user {}, using rule-based analysis: {}",
                    user_id, err
                );
                AnalysisReport {
                    success: false,
                    analysis: fallback_insight(&summary),
                    raw_data: summary,
                    timestamp: Utc::now(),
                    model_used: self.advisor.model_name().to_string(),
                    error: Some(err.to_string()),
                }
            }
        };

        Ok(report)
    }
}
