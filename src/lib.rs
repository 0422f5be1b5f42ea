//! # walls
//!
//! Random Flickr wallpapers.
//!
//! Walks a tagged Flickr search in server order and, for each photo, picks
//! the smallest available rendition that still meets the configured minimum
//! width and height. The first photo admitting such a rendition wins and is
//! downloaded into the image directory. Everything runs on one thread with
//! blocking I/O; any failure ends the run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use walls::flickr::{FlickrClient, PhotoSource};
//! use walls::{Config, download, find_first_match};
//!
//! fn main() -> walls::Result<()> {
//!     let config = Config::load(std::path::Path::new("walls.toml"))?;
//!     let client = FlickrClient::new(&config.api_key)?;
//!
//!     let found = find_first_match(
//!         client.walk_tagged(&config.tags),
//!         |id| client.rendition_sizes(id),
//!         &config.constraint(),
//!     )?;
//!
//!     if let Some(url) = found {
//!         download::clear_directory(&config.image_dir)?;
//!         download::save_image(client.http(), &url, &config.image_dir)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration loading and validation
pub mod config;
/// Image directory maintenance and download-to-disk
pub mod download;
/// Error types
pub mod error;
/// First-match photo search driver
pub mod finder;
/// Flickr-backed photo source
pub mod flickr;
/// Rendition parsing and minimum-area size selection
pub mod selection;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use finder::find_first_match;
pub use flickr::{FlickrClient, PhotoSource};
pub use selection::{Constraint, Rendition, parse_renditions, select_smallest};
