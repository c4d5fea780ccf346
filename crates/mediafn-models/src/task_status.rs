//! Statuses of the asynchronous vendor tasks.

use serde::{Deserialize, Serialize};

/// Status of a video indexing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTaskStatus {
    Validating,
    Pending,
    Queued,
    Indexing,
    /// Indexing finished and the video can be queried
    Ready,
    Failed,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl IndexTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexTaskStatus::Validating => "validating",
            IndexTaskStatus::Pending => "pending",
            IndexTaskStatus::Queued => "queued",
            IndexTaskStatus::Indexing => "indexing",
            IndexTaskStatus::Ready => "ready",
            IndexTaskStatus::Failed => "failed",
            IndexTaskStatus::Unknown => "unknown",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, IndexTaskStatus::Ready | IndexTaskStatus::Failed)
    }
}

impl std::fmt::Display for IndexTaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a video generation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationTaskStatus {
    Pending,
    Throttled,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl GenerationTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationTaskStatus::Pending => "PENDING",
            GenerationTaskStatus::Throttled => "THROTTLED",
            GenerationTaskStatus::Running => "RUNNING",
            GenerationTaskStatus::Succeeded => "SUCCEEDED",
            GenerationTaskStatus::Failed => "FAILED",
            GenerationTaskStatus::Cancelled => "CANCELLED",
            GenerationTaskStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationTaskStatus::Succeeded
                | GenerationTaskStatus::Failed
                | GenerationTaskStatus::Cancelled
        )
    }
}

impl std::fmt::Display for GenerationTaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
