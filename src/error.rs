use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Provider not configured: {0}")]
    Configuration(String),

    #[error("Provider connectivity check failed: {0}")]
    Connectivity(String),

    #[error("Insight generation failed: {0}")]
    Provider(String),

    #[error("No profile found for user: {0}")]
    ProfileNotFound(i64),

    #[error("Ledger query failed: {0}")]
    DataSource(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
