//! Fetch-and-catalog loop.
//!
//! # Example
//!
//! ```ignore
//! use memehoard_core::{CatalogStore, Fetcher, MemeApiClient};
//!
//! let store = CatalogStore::new("memes.json");
//! let source = Arc::new(MemeApiClient::new(&config.upstream)?);
//! let fetcher = Fetcher::new(config.fetch.clone(), source, store.clone(), "assets/memes");
//!
//! let report = fetcher.run(store.load().await).await;
//! println!("{} new memes, stopped: {}", report.retained, report.stop);
//! ```

mod naming;
mod runner;
mod types;

pub use naming::{
    destination_extension, is_animated, slot_file_name, url_extension, ALLOWED_EXTENSIONS,
    ANIMATED_EXTENSIONS, DEFAULT_EXTENSION,
};
pub use runner::Fetcher;
pub use types::{rank_items, skip_reason, FetchReport, SkipReason, StopReason};
