//! Types for the meme catalog (the JSON sidecar document).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The whole catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Highest slot handed out so far. Never decreases.
    #[serde(default)]
    pub count: u32,
    /// Entries in download order.
    #[serde(default, rename = "memes")]
    pub entries: Vec<CatalogEntry>,
}

/// One retained asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Source image URL; absent for backfilled entries.
    #[serde(default, rename = "url")]
    pub source_url: Option<String>,
    /// Channel (subreddit) the asset came from.
    #[serde(default, rename = "subreddit")]
    pub channel: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Link to the upstream post.
    #[serde(default, rename = "postLink")]
    pub post_link: Option<String>,
    /// Raw asset file name assigned by the fetch loop (e.g. `meme_007.jpg`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Optimized derivative, relative to the catalog directory.
    #[serde(default, rename = "local")]
    pub local_path: Option<String>,
    /// Square thumbnail, relative to the catalog directory.
    #[serde(default, rename = "thumb")]
    pub thumb_path: Option<String>,
    #[serde(default, rename = "ups")]
    pub upvote_count: u64,
    #[serde(flatten)]
    pub flags: ContentFlags,
    /// When the fetch loop downloaded the asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Content warnings reported by upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFlags {
    #[serde(default, rename = "nsfw")]
    pub is_sensitive: bool,
    #[serde(default, rename = "spoiler")]
    pub is_spoiler: bool,
}

/// Which lookup pass matched a raw file to a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMatch {
    /// The basename of the entry's source URL equals the file name.
    ByUrl(usize),
    /// The entry's recorded raw or local file name equals the file name.
    ByLocalName(usize),
}

impl FileMatch {
    /// Index of the matched entry.
    pub fn index(self) -> usize {
        match self {
            FileMatch::ByUrl(i) | FileMatch::ByLocalName(i) => i,
        }
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry with this source URL exists.
    pub fn contains_url(&self, url: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.source_url.as_deref() == Some(url))
    }

    /// The dedup set: every present source URL.
    pub fn urls(&self) -> HashSet<String> {
        self.entries
            .iter()
            .filter_map(|e| e.source_url.clone())
            .collect()
    }

    /// Slot the next downloaded asset will occupy.
    pub fn next_slot(&self) -> u32 {
        self.count + 1
    }

    /// Find the entry describing a raw file.
    ///
    /// Two passes, first hit wins:
    /// 1. URL basename (query string stripped) equals `file_name`.
    /// 2. Recorded raw file name, or the basename of the local derivative,
    ///    equals `file_name`.
    pub fn match_file(&self, file_name: &str) -> Option<FileMatch> {
        if let Some(i) = self.entries.iter().position(|e| {
            e.source_url
                .as_deref()
                .is_some_and(|url| url_basename(url) == file_name)
        }) {
            return Some(FileMatch::ByUrl(i));
        }

        self.entries
            .iter()
            .position(|e| {
                e.file.as_deref() == Some(file_name)
                    || e.local_path
                        .as_deref()
                        .is_some_and(|local| path_basename(local) == file_name)
            })
            .map(FileMatch::ByLocalName)
    }
}

/// Last path segment of a URL without its query string.
pub fn url_basename(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    path_basename(without_query)
}

fn path_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog document is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),
}
