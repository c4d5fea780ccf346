//! Application state.

use std::sync::Arc;

use tracing::warn;

use mediafn_media::VideoDownloader;
use mediafn_runway::{RunwayClient, RunwayError};
use mediafn_twelvelabs::{TwelveLabsClient, TwelveLabsError};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Shared application state.
///
/// Vendor clients are optional so the server can start with only one vendor
/// configured; functions needing a missing vendor fail per request.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub downloader: Arc<VideoDownloader>,
    pub twelve_labs: Option<Arc<TwelveLabsClient>>,
    pub runway: Option<Arc<RunwayClient>>,
}

impl AppState {
    /// Create application state from environment variables.
    pub fn from_env(config: ApiConfig) -> ApiResult<Self> {
        let downloader = VideoDownloader::from_env()?;

        let twelve_labs = match TwelveLabsClient::from_env() {
            Ok(client) => Some(client),
            Err(TwelveLabsError::MissingApiKey) => {
                warn!("TWELVE_LABS_KEY not set, title/hashtag generation disabled");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let runway = match RunwayClient::from_env() {
            Ok(client) => Some(client),
            Err(RunwayError::MissingApiKey) => {
                warn!("RUNWAYML_API_SECRET not set, video generation disabled");
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::new(config, downloader, twelve_labs, runway))
    }

    /// Create application state from already built clients.
    pub fn new(
        config: ApiConfig,
        downloader: VideoDownloader,
        twelve_labs: Option<TwelveLabsClient>,
        runway: Option<RunwayClient>,
    ) -> Self {
        Self {
            config,
            downloader: Arc::new(downloader),
            twelve_labs: twelve_labs.map(Arc::new),
            runway: runway.map(Arc::new),
        }
    }

    /// Twelve Labs client, or an error when no key is configured.
    pub fn twelve_labs(&self) -> ApiResult<Arc<TwelveLabsClient>> {
        self.twelve_labs
            .clone()
            .ok_or(ApiError::TwelveLabs(TwelveLabsError::MissingApiKey))
    }

    /// Runway client, or an error when no key is configured.
    pub fn runway(&self) -> ApiResult<Arc<RunwayClient>> {
        self.runway
            .clone()
            .ok_or(ApiError::Runway(RunwayError::MissingApiKey))
    }
}
