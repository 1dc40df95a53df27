//! Testing utilities and mock implementations.
//!
//! This module provides a mock upstream so the fetch loop can be exercised
//! end to end without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use memehoard_core::testing::{fixtures, MockMemeSource};
//!
//! let source = MockMemeSource::new();
//!
//! // Configure mock responses
//! let items = fixtures::raw_items(5);
//! source.push_batch(items.clone()).await;
//! source.serve_all(&items).await;
//! ```

mod mock_source;

pub use mock_source::{MockMemeSource, RecordedRequest};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    use image::{Rgb, RgbImage};

    use crate::catalog::ContentFlags;
    use crate::config::FetchConfig;
    use crate::upstream::RawItem;

    /// Create a raw upstream item with reasonable defaults.
    pub fn raw_item(url: &str, upvote_count: u64) -> RawItem {
        RawItem {
            url: url.to_string(),
            channel: Some("wholesomememes".to_string()),
            title: Some(format!("Meme at {}", url)),
            author: Some("mock-author".to_string()),
            post_link: Some(format!("https://redd.it/{}", upvote_count)),
            upvote_count,
            flags: ContentFlags::default(),
        }
    }

    /// Create `n` distinct JPEG items with descending upvotes.
    pub fn raw_items(n: u32) -> Vec<RawItem> {
        (1..=n)
            .map(|i| raw_item(&format!("https://i.redd.it/meme{}.jpg", i), 1000 - i as u64))
            .collect()
    }

    /// Fetch config with no delays, for tests.
    pub fn fast_fetch_config(target_count: u32, batch_size: u32) -> FetchConfig {
        FetchConfig {
            target_count,
            batch_size,
            item_delay_ms: 0,
            batch_delay_ms: 0,
            ..Default::default()
        }
    }

    /// Write a solid-colour PNG of the given size.
    pub fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 90]));
        img.save(path).expect("Failed to write test image");
    }
}
