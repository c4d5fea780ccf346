//! Image-to-video generation.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use mediafn_models::GenerateRunwayVideoResponse;
use mediafn_runway::{ImageToVideoRequest, RunwayClient};

use crate::error::ApiResult;
use crate::metrics;

/// Turns an image (plus optional prompt) into a generated video URL.
pub struct VideoGenerationService {
    runway: Arc<RunwayClient>,
}

impl VideoGenerationService {
    pub fn new(runway: Arc<RunwayClient>) -> Self {
        Self { runway }
    }

    pub async fn generate(
        &self,
        image_url: &str,
        prompt_text: Option<&str>,
    ) -> ApiResult<GenerateRunwayVideoResponse> {
        let request = ImageToVideoRequest::new(self.runway.config(), image_url, prompt_text);
        info!(
            image_url = %request.prompt_image,
            prompt_text = %request.prompt_text,
            "Creating image-to-video task..."
        );

        let start = Instant::now();
        let mut polls = 0u64;
        let output = self
            .runway
            .generate_video_with(&request, |_| polls += 1)
            .await;
        metrics::record_vendor_polls("runway", polls);
        metrics::record_vendor_task(
            "runway",
            "image_to_video",
            if output.is_ok() { "ok" } else { "error" },
            start.elapsed().as_secs_f64(),
        );

        Ok(GenerateRunwayVideoResponse::succeeded(output?))
    }
}
