use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

use crate::error::{AnalysisError, Result};
use crate::llm::provider::InsightProvider;
use crate::llm::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

const DEFAULT_LOCATION: &str = "us-central1";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the Vertex AI Gemini endpoint. Passed in at
/// construction; nothing here is read from ambient/global state.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub project_id: String,
    pub location: String,
    pub model: String,
    /// Upper bound on each generation round-trip, probe included.
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            ..Self::default()
        }
    }
}

/// Thin REST client for the Vertex AI `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let base_url = format!(
            "https://{loc}-aiplatform.googleapis.com/v1/projects/{proj}/locations/{loc}/publishers/google/models",
            loc = config.location,
            proj = config.project_id,
        );
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Overrides the endpoint root, for pointing at a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_content(
        &self,
        prompt: &str,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.config.model);

        let generation_config = response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: Some(schema),
        });

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config,
        };

        debug!("Sending generation request, prompt length {}", prompt.len());

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(AnalysisError::Provider(format!(
                "Gemini API error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;

        let part = body
            .candidates
            .ok_or_else(|| AnalysisError::Provider("No candidates returned".to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Provider("Empty candidates list".to_string()))?
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Provider("No parts in content".to_string()))?;

        let Part::Text { text } = part;
        info!("Received generation response, length {}", text.len());
        Ok(text)
    }
}

#[async_trait]
impl InsightProvider for GeminiClient {
    fn ensure_configured(&self) -> Result<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(AnalysisError::Configuration(
                "Gemini API key is not configured".to_string(),
            ));
        }
        if self.config.project_id.trim().is_empty() {
            return Err(AnalysisError::Configuration(
                "Gemini project ID is not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt, None).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String> {
        self.generate_content(prompt, Some(schema.clone())).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
