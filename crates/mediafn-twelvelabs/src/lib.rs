//! Client for the Twelve Labs video understanding API.
//!
//! Covers the subset the functions need: uploading a video into an index,
//! polling the indexing task until it settles, and generating text about
//! an indexed video.

pub mod client;
pub mod error;
pub mod types;

pub use client::{TwelveLabsClient, TwelveLabsConfig};
pub use error::{TwelveLabsError, TwelveLabsResult};
pub use types::{GeneratedText, IndexTask, IndexedVideo};
