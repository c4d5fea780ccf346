//! Video download over plain HTTP(S).
//!
//! The response body is streamed chunk by chunk to disk, never buffered
//! whole in memory.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::{redirect, Client};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};
use crate::host::is_restricted_url;

/// File name of the downloaded video inside its workspace.
const VIDEO_FILE_NAME: &str = "video.mp4";

/// Default ceiling on downloaded bytes (2 GiB).
const DEFAULT_MAX_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Maximum number of redirects followed per download.
const MAX_REDIRECTS: usize = 10;

/// Configuration for [`VideoDownloader`].
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Overall request timeout
    pub timeout: Duration,
    /// Maximum accepted body size
    pub max_bytes: u64,
    /// Follow redirects into loopback/private/metadata hosts
    pub allow_private_hosts: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            max_bytes: DEFAULT_MAX_BYTES,
            allow_private_hosts: false,
        }
    }
}

impl DownloadConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_secs(
                std::env::var("DOWNLOAD_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            max_bytes: std::env::var("DOWNLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BYTES),
            allow_private_hosts: std::env::var("ALLOW_PRIVATE_URLS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

/// A video downloaded into its own temporary directory.
///
/// The directory and the file are deleted when this value is dropped.
#[derive(Debug)]
pub struct DownloadedVideo {
    dir: TempDir,
    path: PathBuf,
    bytes: u64,
    elapsed: Duration,
}

impl DownloadedVideo {
    /// Path of the video file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bytes written.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Wall time spent downloading.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Directory holding the video.
    pub fn workspace(&self) -> &Path {
        self.dir.path()
    }
}

/// Downloads remote videos to temporary storage.
#[derive(Debug, Clone)]
pub struct VideoDownloader {
    http: Client,
    config: DownloadConfig,
}

impl VideoDownloader {
    /// Create a new downloader.
    pub fn new(config: DownloadConfig) -> MediaResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect_policy(config.allow_private_hosts))
            .build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> MediaResult<Self> {
        Self::new(DownloadConfig::from_env())
    }

    /// Download `url` into a fresh temporary directory.
    pub async fn download(&self, url: &str) -> MediaResult<DownloadedVideo> {
        let start = Instant::now();
        debug!(url = %url, "Requesting video");

        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::download_failed(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let limit = self.config.max_bytes;
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(MediaError::TooLarge { limit });
        }

        let dir = tempfile::Builder::new().prefix("mediafn-").tempdir()?;
        let path = dir.path().join(VIDEO_FILE_NAME);
        let mut file = tokio::fs::File::create(&path).await?;

        let mut stream = response.bytes_stream();
        let mut bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            bytes += chunk.len() as u64;
            if bytes > limit {
                return Err(MediaError::TooLarge { limit });
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        let elapsed = start.elapsed();
        info!(
            path = %path.display(),
            bytes,
            duration_ms = elapsed.as_millis() as u64,
            "Download complete"
        );

        Ok(DownloadedVideo {
            dir,
            path,
            bytes,
            elapsed,
        })
    }
}

/// Redirect policy re-checking every hop, since the caller only validated
/// the first URL.
fn redirect_policy(allow_private_hosts: bool) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if !allow_private_hosts && is_restricted_url(attempt.url()) {
            warn!(target_url = %attempt.url(), "Refusing redirect to restricted host");
            attempt.error("redirect to an internal or restricted endpoint")
        } else {
            attempt.follow()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn downloader(max_bytes: u64) -> VideoDownloader {
        VideoDownloader::new(DownloadConfig {
            timeout: Duration::from_secs(5),
            max_bytes,
            allow_private_hosts: true,
        })
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = DownloadConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(600));
        assert_eq!(config.max_bytes, DEFAULT_MAX_BYTES);
        assert!(!config.allow_private_hosts);
    }

    #[tokio::test]
    async fn test_download_writes_body_to_temp_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake mp4 bytes".to_vec()))
            .mount(&server)
            .await;

        let video = downloader(1024)
            .download(&format!("{}/clip.mp4", server.uri()))
            .await
            .unwrap();

        assert_eq!(video.bytes(), 14);
        assert!(video.path().ends_with(VIDEO_FILE_NAME));
        let content = tokio::fs::read(video.path()).await.unwrap();
        assert_eq!(content, b"fake mp4 bytes");

        let workspace = video.workspace().to_path_buf();
        drop(video);
        assert!(!workspace.exists());
    }

    #[tokio::test]
    async fn test_concurrent_downloads_use_separate_files() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
            .mount(&server)
            .await;

        let dl = downloader(1024);
        let url = format!("{}/v.mp4", server.uri());
        let (a, b) = tokio::join!(dl.download(&url), dl.download(&url));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn test_download_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = downloader(1024)
            .download(&format!("{}/missing.mp4", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::DownloadFailed { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_download_enforces_size_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
            .mount(&server)
            .await;

        let err = downloader(16)
            .download(&format!("{}/big.mp4", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::TooLarge { limit: 16 }));
    }

    #[tokio::test]
    async fn test_download_connection_error_is_network() {
        // Reserve a port, then free it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let err = downloader(1024)
            .download(&format!("http://127.0.0.1:{}/v.mp4", port))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Network(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_redirect_to_restricted_host_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public.mp4"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "http://169.254.169.254/latest/meta-data"),
            )
            .mount(&server)
            .await;

        let strict = VideoDownloader::new(DownloadConfig {
            timeout: Duration::from_secs(5),
            max_bytes: 1024,
            allow_private_hosts: false,
        })
        .unwrap();

        let err = strict
            .download(&format!("{}/public.mp4", server.uri()))
            .await
            .unwrap_err();

        match err {
            MediaError::Network(e) => assert!(e.is_redirect(), "{:?}", e),
            other => panic!("expected redirect error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_redirect_followed_when_private_hosts_allowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old.mp4"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", format!("{}/new.mp4", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"moved".to_vec()))
            .mount(&server)
            .await;

        let video = downloader(1024)
            .download(&format!("{}/old.mp4", server.uri()))
            .await
            .unwrap();
        assert_eq!(video.bytes(), 5);
    }
}
