//! Types for the upstream meme API.

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::ContentFlags;

/// One item as returned by upstream, reduced to the fields the pipeline uses.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub url: String,
    pub channel: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub post_link: Option<String>,
    pub upvote_count: u64,
    pub flags: ContentFlags,
}

/// Errors raised while talking to upstream or writing what it returned.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, DNS or timeout failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Upstream body was not the expected JSON.
    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    /// Writing a downloaded asset failed.
    #[error("Failed to write {path}: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Upstream API Response Types
// ============================================================================

/// Upstream answers either with a list document or with one bare item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BatchResponse {
    Many { memes: Vec<ApiItem> },
    Single(ApiItem),
}

impl BatchResponse {
    pub(crate) fn into_items(self) -> Vec<RawItem> {
        match self {
            BatchResponse::Many { memes } => memes.into_iter().map(Into::into).collect(),
            BatchResponse::Single(item) => vec![item.into()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiItem {
    url: String,
    #[serde(default)]
    ups: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    subreddit: Option<String>,
    #[serde(default)]
    post_link: Option<String>,
    #[serde(default)]
    nsfw: bool,
    #[serde(default)]
    spoiler: bool,
}

impl From<ApiItem> for RawItem {
    fn from(item: ApiItem) -> Self {
        Self {
            url: item.url,
            channel: item.subreddit,
            title: item.title,
            author: item.author,
            post_link: item.post_link,
            upvote_count: item.ups.unwrap_or(0),
            flags: ContentFlags {
                is_sensitive: item.nsfw,
                is_spoiler: item.spoiler,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_response() {
        let json = r#"{
            "count": 2,
            "memes": [
                {
                    "postLink": "https://redd.it/1",
                    "subreddit": "wholesomememes",
                    "title": "First",
                    "url": "https://i.redd.it/1.jpg",
                    "nsfw": false,
                    "spoiler": false,
                    "author": "a",
                    "ups": 10,
                    "preview": ["https://preview.redd.it/1.jpg"]
                },
                { "url": "https://i.redd.it/2.png", "nsfw": true }
            ]
        }"#;
        let items = serde_json::from_str::<BatchResponse>(json)
            .unwrap()
            .into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].channel.as_deref(), Some("wholesomememes"));
        assert_eq!(items[0].post_link.as_deref(), Some("https://redd.it/1"));
        assert_eq!(items[0].upvote_count, 10);
        assert_eq!(items[1].upvote_count, 0);
        assert!(items[1].flags.is_sensitive);
    }

    #[test]
    fn test_parse_single_item_response() {
        let json = r#"{ "url": "https://i.redd.it/solo.jpg", "ups": 5, "title": "Solo" }"#;
        let items = serde_json::from_str::<BatchResponse>(json)
            .unwrap()
            .into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://i.redd.it/solo.jpg");
        assert_eq!(items[0].title.as_deref(), Some("Solo"));
    }

    #[test]
    fn test_parse_empty_list_response() {
        let items = serde_json::from_str::<BatchResponse>(r#"{ "count": 0, "memes": [] }"#)
            .unwrap()
            .into_items();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_rejects_item_without_url() {
        let result = serde_json::from_str::<BatchResponse>(r#"{ "title": "no url" }"#);
        assert!(result.is_err());
    }
}
