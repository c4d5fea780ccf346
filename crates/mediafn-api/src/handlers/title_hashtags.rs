//! `generateTitleHashtags` function.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::error;

use mediafn_models::{GenerateTitleHashtagsRequest, GenerateTitleHashtagsResponse};

use crate::error::{ApiError, ApiResult};
use crate::security::validate_media_url;
use crate::services::{with_deadline, TitleHashtagsService};
use crate::state::AppState;

/// Generate a title and hashtags for the video at `videoUrl`.
pub async fn generate_title_hashtags(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTitleHashtagsRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateTitleHashtagsResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let video_url = request
        .video_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("videoUrl is required"))?;
    let video_url = validate_media_url(video_url, state.config.allow_private_urls)
        .into_result()
        .map_err(ApiError::BadRequest)?;

    let response = async {
        let service = TitleHashtagsService::new(state.downloader.clone(), state.twelve_labs()?);
        with_deadline(state.config.title_hashtags_timeout, service.generate(&video_url)).await
    }
    .await
    .inspect_err(|e| {
        error!(error = %e, video_url = %video_url, "Error in generateTitleHashtags");
    })?;

    Ok(Json(response))
}
