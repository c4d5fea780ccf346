//! Runway HTTP client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info, warn};

use mediafn_models::GenerationTaskStatus;

use crate::error::{RunwayError, RunwayResult};
use crate::types::{CreatedTask, GenerationTask, ImageToVideoRequest};

const DEFAULT_BASE_URL: &str = "https://api.dev.runwayml.com/v1";
const DEFAULT_API_VERSION: &str = "2024-11-06";

/// Configuration for the Runway client.
#[derive(Clone)]
pub struct RunwayConfig {
    /// Bearer token
    pub api_key: String,
    pub base_url: String,
    /// Sent as `X-Runway-Version`
    pub api_version: String,
    pub model: String,
    /// Generated clip length in seconds
    pub duration: u32,
    pub ratio: String,
    /// Delay before each status check
    pub poll_interval: Duration,
    /// Status checks before giving up
    pub max_polls: u32,
    /// Per-request timeout
    pub timeout: Duration,
    /// Max retries for idempotent requests
    pub max_retries: u32,
}

impl std::fmt::Debug for RunwayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunwayConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("duration", &self.duration)
            .field("ratio", &self.ratio)
            .field("poll_interval", &self.poll_interval)
            .field("max_polls", &self.max_polls)
            .finish_non_exhaustive()
    }
}

impl RunwayConfig {
    /// Config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: "gen3a_turbo".to_string(),
            duration: 10,
            ratio: "1280:768".to_string(),
            poll_interval: Duration::from_secs(5),
            max_polls: 12,
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> RunwayResult<Self> {
        let api_key = std::env::var("RUNWAYML_API_SECRET")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(RunwayError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("RUNWAYML_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(version) = std::env::var("RUNWAYML_API_VERSION") {
            config.api_version = version;
        }
        if let Ok(model) = std::env::var("RUNWAY_MODEL") {
            config.model = model;
        }
        if let Ok(ratio) = std::env::var("RUNWAY_RATIO") {
            config.ratio = ratio;
        }
        if let Some(duration) = env_parse("RUNWAY_DURATION") {
            config.duration = duration;
        }
        if let Some(ms) = env_parse("RUNWAY_POLL_INTERVAL_MS") {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(polls) = env_parse("RUNWAY_MAX_POLLS") {
            config.max_polls = polls;
        }
        if let Some(secs) = env_parse("RUNWAY_TIMEOUT") {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = env_parse("RUNWAY_RETRIES") {
            config.max_retries = retries;
        }
        Ok(config)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Client for the Runway API.
#[derive(Debug, Clone)]
pub struct RunwayClient {
    http: Client,
    config: RunwayConfig,
}

impl RunwayClient {
    /// Create a new client.
    pub fn new(config: RunwayConfig) -> RunwayResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(RunwayError::MissingApiKey);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RunwayError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> RunwayResult<Self> {
        Self::new(RunwayConfig::from_env()?)
    }

    pub fn config(&self) -> &RunwayConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.config.api_key)
            .header("X-Runway-Version", &self.config.api_version)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Submit an image-to-video task and return its id.
    pub async fn create_image_to_video(&self, request: &ImageToVideoRequest) -> RunwayResult<String> {
        debug!(model = %request.model, seed = request.seed, "Submitting image-to-video task");

        let response = self
            .authorized(self.http.post(self.url("/image_to_video")))
            .json(request)
            .send()
            .await?;

        let created: CreatedTask = check_status(response).await?.json().await?;
        Ok(created.id)
    }

    /// Fetch the current state of a task.
    pub async fn get_task(&self, task_id: &str) -> RunwayResult<GenerationTask> {
        let url = self.url(&format!("/tasks/{}", task_id));

        self.with_retry(|| async {
            let response = self.authorized(self.http.get(&url)).send().await?;
            let task: GenerationTask = check_status(response).await?.json().await?;
            Ok::<_, RunwayError>(task)
        })
        .await
    }

    /// Poll a task until it produces an output URL.
    ///
    /// Sleeps `poll_interval` before each of at most `max_polls` checks.
    pub async fn wait_for_output(&self, task_id: &str) -> RunwayResult<String> {
        self.wait_for_output_with(task_id, |_| {}).await
    }

    /// [`Self::wait_for_output`], also handing every polled task to `on_status`.
    pub async fn wait_for_output_with<F>(&self, task_id: &str, mut on_status: F) -> RunwayResult<String>
    where
        F: FnMut(&GenerationTask),
    {
        for attempt in 1..=self.config.max_polls {
            tokio::time::sleep(self.config.poll_interval).await;

            let task = self.get_task(task_id).await?;
            info!(task_id = %task_id, attempt, "Task status: {}", task.status);
            on_status(&task);

            match task.status {
                GenerationTaskStatus::Succeeded => {
                    return task.first_output().map(str::to_string).ok_or_else(|| {
                        RunwayError::InvalidResponse(format!("task {} succeeded without output", task_id))
                    });
                }
                GenerationTaskStatus::Failed | GenerationTaskStatus::Cancelled => {
                    return Err(RunwayError::GenerationFailed {
                        reason: task.failure,
                    });
                }
                _ => {}
            }
        }

        Err(RunwayError::TimedOut {
            polls: self.config.max_polls,
        })
    }

    /// Submit a task and wait for the generated video URL.
    pub async fn generate_video(&self, request: &ImageToVideoRequest) -> RunwayResult<String> {
        self.generate_video_with(request, |_| {}).await
    }

    /// [`Self::generate_video`] with a per-poll status observer.
    pub async fn generate_video_with<F>(&self, request: &ImageToVideoRequest, on_status: F) -> RunwayResult<String>
    where
        F: FnMut(&GenerationTask),
    {
        let task_id = self.create_image_to_video(request).await?;
        info!(task_id = %task_id, "Task created");
        self.wait_for_output_with(&task_id, on_status).await
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> RunwayResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = RunwayResult<T>>,
    {
        let mut attempt = 0u32;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "Runway request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Turn a non-2xx response into [`RunwayError::Api`].
async fn check_status(response: Response) -> RunwayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RunwayError::Api {
        status: status.as_u16(),
        body,
    })
}
