//! Twelve Labs request/response types.

use mediafn_models::IndexTaskStatus;
use serde::{Deserialize, Serialize};

/// Response to a task creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTask {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

/// A video indexing task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexTask {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_id: Option<String>,
    /// Set once the upload has been accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub status: IndexTaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Outcome of a successful upload + indexing round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedVideo {
    pub task_id: String,
    pub video_id: String,
}

/// Text generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub video_id: &'a str,
    pub prompt: &'a str,
}

/// Text generated about a video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl GeneratedText {
    /// Generated text, empty when the service returned none.
    pub fn text(&self) -> &str {
        self.data.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_wire_shape() {
        let task: IndexTask = serde_json::from_str(
            r#"{"_id": "t1", "index_id": "i1", "video_id": "v1", "status": "ready", "estimated_time": "x"}"#,
        )
        .unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.video_id.as_deref(), Some("v1"));
        assert_eq!(task.status, IndexTaskStatus::Ready);
    }

    #[test]
    fn test_generated_text_without_data() {
        let text: GeneratedText = serde_json::from_str(r#"{"id": "g1"}"#).unwrap();
        assert_eq!(text.text(), "");
    }
}
