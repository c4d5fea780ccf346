//! Runway request/response types.

use mediafn_models::GenerationTaskStatus;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::client::RunwayConfig;

/// Prompt used when the caller gives none.
pub const DEFAULT_PROMPT_TEXT: &str = "Generate a short video";

/// Seeds are drawn from `[0, MAX_SEED)`.
const MAX_SEED: u32 = 4_294_967_295;

/// Image-to-video task submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageToVideoRequest {
    pub model: String,
    /// HTTPS URL (or data URI) of the first frame
    pub prompt_image: String,
    pub prompt_text: String,
    /// Clip length in seconds
    pub duration: u32,
    /// Output resolution as `W:H`
    pub ratio: String,
    pub seed: u32,
    pub watermark: bool,
}

impl ImageToVideoRequest {
    /// Build a request with the configured model settings and a random seed.
    pub fn new(config: &RunwayConfig, prompt_image: impl Into<String>, prompt_text: Option<&str>) -> Self {
        let prompt_text = prompt_text
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROMPT_TEXT)
            .to_string();

        Self {
            model: config.model.clone(),
            prompt_image: prompt_image.into(),
            prompt_text,
            duration: config.duration,
            ratio: config.ratio.clone(),
            seed: rand::rng().random_range(0..MAX_SEED),
            watermark: false,
        }
    }
}

/// Response to a task creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTask {
    pub id: String,
}

/// A generation task as reported by `GET /tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTask {
    pub id: String,
    pub status: GenerationTaskStatus,
    /// Output asset URLs, present once the task succeeded
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl GenerationTask {
    /// First output URL, if any.
    pub fn first_output(&self) -> Option<&str> {
        self.output.as_ref()?.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_and_wire_names() {
        let config = RunwayConfig::new("key");
        let req = ImageToVideoRequest::new(&config, "https://img/cat.png", None);
        assert_eq!(req.prompt_text, DEFAULT_PROMPT_TEXT);
        assert_eq!(req.model, "gen3a_turbo");
        assert_eq!(req.duration, 10);
        assert_eq!(req.ratio, "1280:768");
        assert!(!req.watermark);
        assert!(req.seed < MAX_SEED);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["promptImage"], "https://img/cat.png");
        assert_eq!(json["promptText"], DEFAULT_PROMPT_TEXT);
        assert_eq!(json["watermark"], false);
    }

    #[test]
    fn test_empty_prompt_falls_back() {
        let config = RunwayConfig::new("key");
        let req = ImageToVideoRequest::new(&config, "https://img/cat.png", Some(""));
        assert_eq!(req.prompt_text, DEFAULT_PROMPT_TEXT);

        let req = ImageToVideoRequest::new(&config, "https://img/cat.png", Some("slow pan"));
        assert_eq!(req.prompt_text, "slow pan");
    }

    #[test]
    fn test_task_output() {
        let task: GenerationTask = serde_json::from_str(
            r#"{"id": "t", "status": "SUCCEEDED", "output": ["https://cdn/a.mp4", "https://cdn/b.mp4"]}"#,
        )
        .unwrap();
        assert_eq!(task.first_output(), Some("https://cdn/a.mp4"));

        let task: GenerationTask =
            serde_json::from_str(r#"{"id": "t", "status": "RUNNING", "output": null}"#).unwrap();
        assert_eq!(task.first_output(), None);
    }
}
