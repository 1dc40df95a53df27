//! Meme catalog - the durable record of every retained asset.
//!
//! The catalog is a single JSON document loaded fully into memory before a
//! run and rewritten wholesale afterwards. It is the only source of truth for
//! "what has already been fetched".

mod store;
mod types;

pub use store::CatalogStore;
pub use types::*;
