//! Error types for media operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while fetching media.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("Download exceeded the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }
}
