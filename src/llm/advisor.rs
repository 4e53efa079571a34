use log::{debug, info};
use std::sync::Arc;

use crate::error::{AnalysisError, Result};
use crate::insight::InsightResult;
use crate::llm::prompts::{build_analysis_prompt, PROBE_PROMPT};
use crate::llm::provider::InsightProvider;
use crate::summary::FinancialSummary;

/// Drives a single insight-generation attempt against a provider: checks the
/// configuration, probes connectivity, then makes exactly one real request.
/// Provider unavailability is treated as a routing decision, not a transient
/// fault: there are no retries or backoff at this layer.
pub struct FinancialAdvisor {
    provider: Arc<dyn InsightProvider>,
}

impl FinancialAdvisor {
    pub fn new(provider: Arc<dyn InsightProvider>) -> Self {
        Self { provider }
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Returns the provider's raw response text for the analysis prompt, or
    /// the failure that should route the caller to the rule-based analyzer.
    pub async fn generate_insight(
        &self,
        summary: &FinancialSummary,
        display_name: &str,
    ) -> Result<String> {
        self.provider.ensure_configured()?;
        self.probe().await?;

        let prompt = build_analysis_prompt(summary, display_name);
        debug!("Built analysis prompt, length {}", prompt.len());

        let schema = serde_json::to_value(InsightResult::response_schema())?;
        self.provider
            .generate_structured(&prompt, &schema)
            .await
            .map_err(|err| match err {
                AnalysisError::Provider(_) => err,
                other => AnalysisError::Provider(other.to_string()),
            })
    }

    /// One trivial round-trip; any error or empty reply fails the whole
    /// request immediately.
    async fn probe(&self) -> Result<()> {
        match self.provider.generate(PROBE_PROMPT).await {
            Ok(reply) if !reply.trim().is_empty() => {
                info!("Provider connectivity check passed");
                Ok(())
            }
            Ok(_) => Err(AnalysisError::Connectivity(
                "provider returned an empty probe response".to_string(),
            )),
            Err(err) => Err(AnalysisError::Connectivity(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct ScriptedProvider {
        configured: bool,
        probe_reply: Result<String>,
        generation_reply: Result<String>,
    }

    impl ScriptedProvider {
        fn healthy(generation: &str) -> Self {
            Self {
                configured: true,
                probe_reply: Ok("OK".to_string()),
                generation_reply: Ok(generation.to_string()),
            }
        }
    }

    #[async_trait]
    impl InsightProvider for ScriptedProvider {
        fn ensure_configured(&self) -> Result<()> {
            if self.configured {
                Ok(())
            } else {
                Err(AnalysisError::Configuration("missing key".to_string()))
            }
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            let reply = if prompt == PROBE_PROMPT {
                &self.probe_reply
            } else {
                &self.generation_reply
            };
            match reply {
                Ok(text) => Ok(text.clone()),
                Err(err) => Err(AnalysisError::Provider(err.to_string())),
            }
        }

        fn model_name(&self) -> &str {
            "scripted-model"
        }
    }

    fn summary() -> FinancialSummary {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        aggregate(1, &[], &[], start, end)
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_before_any_call() {
        let advisor = FinancialAdvisor::new(Arc::new(ScriptedProvider {
            configured: false,
            probe_reply: Ok("OK".to_string()),
            generation_reply: Ok("{}".to_string()),
        }));
        let err = advisor.generate_insight(&summary(), "User").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_failed_probe_maps_to_connectivity_error() {
        let advisor = FinancialAdvisor::new(Arc::new(ScriptedProvider {
            configured: true,
            probe_reply: Err(AnalysisError::Provider("unreachable".to_string())),
            generation_reply: Ok("{}".to_string()),
        }));
        let err = advisor.generate_insight(&summary(), "User").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Connectivity(_)));
    }

    #[tokio::test]
    async fn test_empty_probe_reply_counts_as_connectivity_failure() {
        let advisor = FinancialAdvisor::new(Arc::new(ScriptedProvider {
            configured: true,
            probe_reply: Ok("   ".to_string()),
            generation_reply: Ok("{}".to_string()),
        }));
        let err = advisor.generate_insight(&summary(), "User").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Connectivity(_)));
    }

    #[tokio::test]
    async fn test_generation_failure_maps_to_provider_error() {
        let advisor = FinancialAdvisor::new(Arc::new(ScriptedProvider {
            configured: true,
            probe_reply: Ok("OK".to_string()),
            generation_reply: Err(AnalysisError::Provider("quota exceeded".to_string())),
        }));
        let err = advisor.generate_insight(&summary(), "User").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Provider(_)));
    }

    #[tokio::test]
    async fn test_successful_generation_returns_raw_text() {
        let advisor = FinancialAdvisor::new(Arc::new(ScriptedProvider::healthy("raw response")));
        let raw = advisor.generate_insight(&summary(), "User").await.unwrap();
        assert_eq!(raw, "raw response");
    }
}
