//! Remote video download into temporary workspaces.
//!
//! Each download gets its own temporary directory so concurrent requests
//! never share a file; the directory is removed when the returned
//! [`DownloadedVideo`] is dropped.

pub mod download;
pub mod error;
pub mod host;

pub use download::{DownloadConfig, DownloadedVideo, VideoDownloader};
pub use error::{MediaError, MediaResult};
pub use host::is_restricted_url;
