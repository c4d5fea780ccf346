//! Client for the Runway image-to-video API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{RunwayClient, RunwayConfig};
pub use error::{RunwayError, RunwayResult};
pub use types::{GenerationTask, ImageToVideoRequest, DEFAULT_PROMPT_TEXT};
