//! Twelve Labs client error types.

use mediafn_models::IndexTaskStatus;
use thiserror::Error;

pub type TwelveLabsResult<T> = Result<T, TwelveLabsError>;

#[derive(Debug, Error)]
pub enum TwelveLabsError {
    #[error("TWELVE_LABS_KEY is not configured")]
    MissingApiKey,

    #[error("Twelve Labs API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Indexing failed with status {status}")]
    IndexingFailed { status: IndexTaskStatus },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0} seconds waiting for indexing")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TwelveLabsError {
    pub fn is_retryable(&self) -> bool {
        match self {
            TwelveLabsError::Network(_) => true,
            TwelveLabsError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TwelveLabsError::Api { status: 503, body: String::new() }.is_retryable());
        assert!(TwelveLabsError::Api { status: 429, body: String::new() }.is_retryable());
        assert!(!TwelveLabsError::Api { status: 400, body: String::new() }.is_retryable());
        assert!(!TwelveLabsError::MissingApiKey.is_retryable());
    }

    #[test]
    fn test_indexing_failed_message() {
        let err = TwelveLabsError::IndexingFailed {
            status: IndexTaskStatus::Failed,
        };
        assert_eq!(err.to_string(), "Indexing failed with status failed");
    }
}
