use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("email provider API key is not configured")]
    MissingApiKey,

    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("email provider request failed: {0}")]
    Transport(String),

    #[error("email provider returned {status}: {message}")]
    Api {
        status: u16,
        name: Option<String>,
        message: String,
    },

    #[error("email provider task failed: {0}")]
    Join(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
