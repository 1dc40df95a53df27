//! Image post-processor.
//!
//! For every raw image in the asset directory that lacks either derivative:
//!
//! - `webp/<stem>.webp`: resized copy, longest side capped
//! - `thumbs/<stem>.webp`: center-cropped square thumbnail
//!
//! Matching catalog entries get their `local`/`thumb` paths filled in; files
//! without an entry get a minimal one. Files that already have both
//! derivatives are left alone, so running twice is a no-op.

mod runner;
mod transform;

pub use runner::{Optimizer, SUPPORTED_EXTENSIONS, THUMBS_DIR, WEBP_DIR};
pub use transform::{bounded_resize, encode_webp, square_thumbnail};

use thiserror::Error;

use crate::catalog::Catalog;

/// Errors that can occur while optimizing images.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source image could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// WebP encoding failed.
    #[error("Failed to encode WebP: {0}")]
    Encode(String),

    /// The blocking worker panicked or was cancelled.
    #[error("Image worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Outcome of an optimizer run.
#[derive(Debug, Clone, Default)]
pub struct OptimizeReport {
    /// Resized derivatives written.
    pub optimized: u32,
    /// Thumbnails written.
    pub thumbnails: u32,
    /// Files that already had both derivatives.
    pub skipped: u32,
    /// Files that failed to decode or write.
    pub failed: u32,
    /// Existing catalog entries updated.
    pub backfilled: u32,
    /// Catalog entries appended for unknown files.
    pub appended: u32,
    /// The catalog after backfilling.
    pub catalog: Catalog,
}
