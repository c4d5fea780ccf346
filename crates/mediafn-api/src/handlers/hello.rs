//! Smoke-test functions.

use axum::extract::State;
use axum::Json;
use tracing::{error, info};

use mediafn_models::MessageResponse;

use crate::error::ApiResult;
use crate::state::AppState;

/// `helloWorld`: plain text greeting.
pub async fn hello_world() -> &'static str {
    info!(structured_data = true, "Hello logs!");
    "Hello from mediafn!"
}

/// `testTwelveLabs`: confirm a Twelve Labs client can be set up.
pub async fn test_twelve_labs(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let client = state.twelve_labs().inspect_err(|e| {
        error!(error = %e, "Error initializing Twelve Labs");
    })?;

    info!(structured_data = true, "Twelve Labs client initialized");
    info!(config = ?client.config(), "Twelve Labs client settings");

    Ok(Json(MessageResponse::new(
        "Successfully set up twelvelabs client!",
    )))
}
