//! # goload - GogoCDN stream resolver
//!
//! Resolves playable stream URLs from anime episode pages whose players are
//! hosted on GogoCDN.
//!
//! ## Pipeline
//!
//! - Pick the embed player URL for the selected server on the episode page
//! - Encrypt the episode id and decrypt the page token (AES-256-CBC)
//! - Call the `encrypt-ajax.php` endpoint and decrypt its source payload
//! - Expand HLS master playlists into one entry per rendition
//! - Merge renditions, direct sources and backups into one ordered list
//!
//! ## Example
//!
//! ```rust,no_run
//! use goload::Resolver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = Resolver::new();
//!     let sources = resolver.resolve("spy-x-family-episode-1", "anime").await?;
//!     for source in sources {
//!         println!("{} {}", source.quality, source.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::core::{sort_by_quality, EpisodeServer, Resolver, ServerKind, ServerSelection, VideoSource};
pub use error::GoloadError;
pub use platform::{CipherKeySet, ClientConfig, GogoCdn, VideoExtractor};

/// Result type alias for goload operations
pub type Result<T> = std::result::Result<T, GoloadError>;
