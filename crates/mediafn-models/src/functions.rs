//! Request and response bodies of the HTTP functions.
//!
//! Field names are camelCase on the wire to stay compatible with existing
//! callers of the functions.

use serde::{Deserialize, Serialize};

/// Message returned on a successful title/hashtag generation.
pub const TITLE_HASHTAGS_SUCCESS_MESSAGE: &str = "Successfully generated titles/hashtags";

/// Body of `POST /generateTitleHashtags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTitleHashtagsRequest {
    /// Publicly reachable URL of the video to index
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Successful response of `POST /generateTitleHashtags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTitleHashtagsResponse {
    pub message: String,
    /// Cleaned generated text (title line, then hashtag line)
    pub result: String,
    /// Parsed title line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Parsed hashtag line
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl GenerateTitleHashtagsResponse {
    /// Build the response from cleaned generated text.
    pub fn from_cleaned(result: String) -> Self {
        let parsed = crate::text::TitleHashtags::parse(&result);
        Self {
            message: TITLE_HASHTAGS_SUCCESS_MESSAGE.to_string(),
            result,
            title: parsed.title,
            hashtags: parsed.hashtags,
        }
    }
}

/// Body of `POST /generateRunwayVideo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRunwayVideoRequest {
    /// Image used as the first frame of the generated video
    #[serde(default)]
    pub image_url: Option<String>,
    /// Optional text prompt
    #[serde(default)]
    pub prompt_text: Option<String>,
}

/// Successful response of `POST /generateRunwayVideo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRunwayVideoResponse {
    pub success: bool,
    pub video_url: String,
}

impl GenerateRunwayVideoResponse {
    pub fn succeeded(video_url: impl Into<String>) -> Self {
        Self {
            success: true,
            video_url: video_url.into(),
        }
    }
}

/// Plain `{"message": ...}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned by every function on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
