use async_trait::async_trait;

use crate::error::Result;

/// Contract to a generative-text backend. Implemented by [`super::GeminiClient`]
/// in production and by hand-rolled fakes in tests; the analysis pipeline only
/// ever talks to this trait, so provider choice and credentials stay at the
/// construction site.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Checks that the provider has everything it needs before any network
    /// attempt. A failure here means "not configured", which callers treat
    /// differently from a failed call.
    fn ensure_configured(&self) -> Result<()>;

    /// Free-form generation. Used for the connectivity probe.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generation constrained to a JSON schema. Defaults to plain generation
    /// for backends without structured-output support.
    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<String> {
        self.generate(prompt).await
    }

    /// Identifier of the underlying model, reported in analysis results.
    fn model_name(&self) -> &str;
}
