//! Upstream meme source abstraction.
//!
//! The fetch loop only talks to a [`MemeSource`]; the real HTTP client and the
//! test mock both implement it. Implementations never retry: pacing and
//! retries belong to the loop.

mod client;
mod types;

pub use client::MemeApiClient;
pub use types::{FetchError, RawItem};

use async_trait::async_trait;

/// A source of meme metadata and image bytes.
#[async_trait]
pub trait MemeSource: Send + Sync {
    /// Returns the name of this source implementation.
    fn name(&self) -> &str;

    /// Fetch up to `count` items from `channel`, or from the mixed default
    /// channel when `channel` is `None`.
    async fn fetch_batch(
        &self,
        channel: Option<&str>,
        count: u32,
    ) -> Result<Vec<RawItem>, FetchError>;

    /// Download the raw bytes behind an image URL (single attempt).
    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
