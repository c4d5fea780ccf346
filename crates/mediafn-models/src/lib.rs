//! Shared wire types for the mediafn functions.
//!
//! This crate provides Serde-serializable types for:
//! - Function request and response bodies
//! - Vendor task statuses (indexing and generation)
//! - Cleanup and parsing of generated title/hashtag text

pub mod functions;
pub mod task_status;
pub mod text;

// Re-export common types
pub use functions::{
    ErrorBody, GenerateRunwayVideoRequest, GenerateRunwayVideoResponse,
    GenerateTitleHashtagsRequest, GenerateTitleHashtagsResponse, MessageResponse,
};
pub use task_status::{GenerationTaskStatus, IndexTaskStatus};
pub use text::{clean_generated_text, TitleHashtags, TITLE_HASHTAGS_PROMPT};
