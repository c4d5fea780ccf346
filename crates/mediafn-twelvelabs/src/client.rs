//! Twelve Labs HTTP client.

use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use mediafn_models::IndexTaskStatus;

use crate::error::{TwelveLabsError, TwelveLabsResult};
use crate::types::{CreatedTask, GenerateRequest, GeneratedText, IndexTask, IndexedVideo};

const DEFAULT_BASE_URL: &str = "https://api.twelvelabs.io/v1.2";

/// Index the functions upload into unless configured otherwise.
pub const DEFAULT_INDEX_ID: &str = "67aa30bf474942061c271230";

/// Configuration for the Twelve Labs client.
#[derive(Clone)]
pub struct TwelveLabsConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,
    /// Base URL including the API version
    pub base_url: String,
    /// Index that uploaded videos land in
    pub index_id: String,
    /// Per-request timeout (uploads included)
    pub timeout: Duration,
    /// Fixed delay between task status checks
    pub poll_interval: Duration,
    /// Give up waiting for indexing after this long
    pub poll_timeout: Duration,
    /// Max retries for idempotent requests
    pub max_retries: u32,
}

impl std::fmt::Debug for TwelveLabsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwelveLabsConfig")
            .field("base_url", &self.base_url)
            .field("index_id", &self.index_id)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("poll_timeout", &self.poll_timeout)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl TwelveLabsConfig {
    /// Config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            index_id: DEFAULT_INDEX_ID.to_string(),
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(280),
            max_retries: 2,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> TwelveLabsResult<Self> {
        let api_key = std::env::var("TWELVE_LABS_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(TwelveLabsError::MissingApiKey)?;

        let defaults = Self::new(api_key);
        Ok(Self {
            base_url: std::env::var("TWELVE_LABS_BASE_URL").unwrap_or(defaults.base_url.clone()),
            index_id: std::env::var("TWELVE_LABS_INDEX_ID").unwrap_or(defaults.index_id.clone()),
            timeout: env_secs("TWELVE_LABS_TIMEOUT").unwrap_or(defaults.timeout),
            poll_interval: std::env::var("TWELVE_LABS_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            poll_timeout: env_secs("TWELVE_LABS_POLL_TIMEOUT").unwrap_or(defaults.poll_timeout),
            max_retries: std::env::var("TWELVE_LABS_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
            ..defaults
        })
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}

/// Client for the Twelve Labs API.
#[derive(Debug, Clone)]
pub struct TwelveLabsClient {
    http: Client,
    config: TwelveLabsConfig,
}

impl TwelveLabsClient {
    /// Create a new client.
    pub fn new(config: TwelveLabsConfig) -> TwelveLabsResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TwelveLabsError::MissingApiKey);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TwelveLabsError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> TwelveLabsResult<Self> {
        Self::new(TwelveLabsConfig::from_env()?)
    }

    pub fn config(&self) -> &TwelveLabsConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Upload a local video file into `index_id`.
    pub async fn create_task(&self, index_id: &str, file: &Path) -> TwelveLabsResult<CreatedTask> {
        let handle = tokio::fs::File::open(file).await?;
        let len = handle.metadata().await?.len();
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());

        let part = Part::stream_with_length(handle, len)
            .file_name(file_name)
            .mime_str("video/mp4")?;
        let form = Form::new()
            .text("index_id", index_id.to_string())
            .part("video_file", part);

        debug!(index_id = %index_id, bytes = len, "Uploading video to Twelve Labs");

        let response = self
            .http
            .post(self.url("/tasks"))
            .header("x-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let task: CreatedTask = check_status(response).await?.json().await?;
        Ok(task)
    }

    /// Fetch the current state of a task.
    pub async fn get_task(&self, task_id: &str) -> TwelveLabsResult<IndexTask> {
        let url = self.url(&format!("/tasks/{}", task_id));

        self.with_retry(|| async {
            let response = self
                .http
                .get(&url)
                .header("x-api-key", &self.config.api_key)
                .send()
                .await?;
            let task: IndexTask = check_status(response).await?.json().await?;
            Ok::<_, TwelveLabsError>(task)
        })
        .await
    }

    /// Poll a task on a fixed interval until it reaches a terminal status.
    ///
    /// `on_status` sees every observed state, the final one included.
    pub async fn wait_for_done<F>(&self, task_id: &str, mut on_status: F) -> TwelveLabsResult<IndexTask>
    where
        F: FnMut(&IndexTask),
    {
        let deadline = Instant::now() + self.config.poll_timeout;

        loop {
            let task = self.get_task(task_id).await?;
            on_status(&task);

            if task.status.is_terminal() {
                return Ok(task);
            }
            if Instant::now() >= deadline {
                return Err(TwelveLabsError::Timeout(self.config.poll_timeout.as_secs()));
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Upload a video into the configured index and wait until it is ready.
    pub async fn index_video(&self, file: &Path) -> TwelveLabsResult<IndexedVideo> {
        self.index_video_with(file, |_| {}).await
    }

    /// [`Self::index_video`], also handing every polled task to `on_status`.
    pub async fn index_video_with<F>(&self, file: &Path, mut on_status: F) -> TwelveLabsResult<IndexedVideo>
    where
        F: FnMut(&IndexTask),
    {
        info!("Creating Twelve Labs task...");
        let created = self.create_task(&self.config.index_id, file).await?;
        info!(task_id = %created.id, "Created task");

        let task = self
            .wait_for_done(&created.id, |task| {
                info!(task_id = %task.id, "taskStatus={}", task.status);
                on_status(task);
            })
            .await?;

        if task.status != IndexTaskStatus::Ready {
            return Err(TwelveLabsError::IndexingFailed {
                status: task.status,
            });
        }

        let video_id = task.video_id.or(created.video_id).ok_or_else(|| {
            TwelveLabsError::InvalidResponse(format!("task {} is ready but has no video_id", task.id))
        })?;

        info!(video_id = %video_id, "Uploaded video");
        Ok(IndexedVideo {
            task_id: task.id,
            video_id,
        })
    }

    /// Generate free-form text about an indexed video.
    pub async fn generate_text(&self, video_id: &str, prompt: &str) -> TwelveLabsResult<GeneratedText> {
        let request = GenerateRequest { video_id, prompt };

        let response = self
            .http
            .post(self.url("/generate"))
            .header("x-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let text: GeneratedText = check_status(response).await?.json().await?;
        Ok(text)
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> TwelveLabsResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = TwelveLabsResult<T>>,
    {
        let mut attempt = 0u32;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "Twelve Labs request failed (attempt {}), retrying in {:?}: {}",
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

/// Turn a non-2xx response into [`TwelveLabsError::Api`].
async fn check_status(response: Response) -> TwelveLabsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(TwelveLabsError::Api {
        status: status.as_u16(),
        body,
    })
}
