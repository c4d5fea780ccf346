//! Request handlers.

pub mod health;
pub mod hello;
pub mod runway_video;
pub mod title_hashtags;

pub use health::*;
pub use hello::*;
pub use runway_video::*;
pub use title_hashtags::*;
