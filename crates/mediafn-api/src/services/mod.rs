//! Function pipelines behind the HTTP handlers.

pub mod title_hashtags;
pub mod video_generation;

use std::future::Future;
use std::time::Duration;

pub use title_hashtags::TitleHashtagsService;
pub use video_generation::VideoGenerationService;

use crate::error::{ApiError, ApiResult};

/// Run a pipeline under the function's overall deadline.
pub async fn with_deadline<T>(limit: Duration, pipeline: impl Future<Output = ApiResult<T>>) -> ApiResult<T> {
    tokio::time::timeout(limit, pipeline)
        .await
        .map_err(|_| ApiError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_deadline_passes_result_through() {
        let value = with_deadline(Duration::from_secs(1), async { Ok::<_, ApiError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_with_deadline_times_out() {
        let err = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ApiError>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Timeout(d) if d == Duration::from_millis(10)));
        assert_eq!(err.to_string(), "Function timed out after 10ms");
    }
}
