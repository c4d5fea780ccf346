//! Download, index and caption a remote video.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use mediafn_media::VideoDownloader;
use mediafn_models::{clean_generated_text, GenerateTitleHashtagsResponse, TITLE_HASHTAGS_PROMPT};
use mediafn_twelvelabs::TwelveLabsClient;

use crate::error::ApiResult;
use crate::metrics;

/// Generates a title and hashtags for a remote video.
pub struct TitleHashtagsService {
    downloader: Arc<VideoDownloader>,
    twelve_labs: Arc<TwelveLabsClient>,
}

impl TitleHashtagsService {
    pub fn new(downloader: Arc<VideoDownloader>, twelve_labs: Arc<TwelveLabsClient>) -> Self {
        Self {
            downloader,
            twelve_labs,
        }
    }

    /// Run the whole pipeline for `video_url`.
    pub async fn generate(&self, video_url: &str) -> ApiResult<GenerateTitleHashtagsResponse> {
        info!(video_url = %video_url, "Starting to generate titles/hashtags...");

        let video = self.downloader.download(video_url).await?;
        metrics::record_download(video.bytes(), video.elapsed().as_secs_f64());

        let start = Instant::now();
        let mut polls = 0u64;
        let indexed = self
            .twelve_labs
            .index_video_with(video.path(), |_| polls += 1)
            .await;
        metrics::record_vendor_polls("twelvelabs", polls);
        metrics::record_vendor_task(
            "twelvelabs",
            "index",
            if indexed.is_ok() { "ok" } else { "error" },
            start.elapsed().as_secs_f64(),
        );
        let indexed = indexed?;
        // The upload is done, the local copy can go
        drop(video);

        info!(video_id = %indexed.video_id, "Generating title and hashtags...");
        let generated = self
            .twelve_labs
            .generate_text(&indexed.video_id, TITLE_HASHTAGS_PROMPT)
            .await?;
        info!(
            "Title/Hashtags Response: {}",
            serde_json::to_string(&generated).unwrap_or_default()
        );

        let cleaned = clean_generated_text(generated.text());
        info!(cleaned = %cleaned, "Cleaned output");

        Ok(GenerateTitleHashtagsResponse::from_cleaned(cleaned))
    }
}
