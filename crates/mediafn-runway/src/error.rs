//! Runway client error types.

use thiserror::Error;

pub type RunwayResult<T> = Result<T, RunwayError>;

#[derive(Debug, Error)]
pub enum RunwayError {
    #[error("RUNWAYML_API_SECRET is not configured")]
    MissingApiKey,

    #[error("Runway API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Generation failed{}", .reason.as_deref().map(|r| format!(": {}", r)).unwrap_or_default())]
    GenerationFailed { reason: Option<String> },

    #[error("Timed out waiting for generation")]
    TimedOut { polls: u32 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RunwayError {
    pub fn is_retryable(&self) -> bool {
        match self {
            RunwayError::Network(_) => true,
            RunwayError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
