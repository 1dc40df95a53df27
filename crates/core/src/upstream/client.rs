//! HTTP client for the meme API.
//!
//! The API serves `<base>/<count>` for the mixed default channel and
//! `<base>/<channel>/<count>` for a named one. It expects a browser-like
//! User-Agent header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{BatchResponse, FetchError, RawItem};
use super::MemeSource;
use crate::config::UpstreamConfig;

/// Meme API client.
pub struct MemeApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    download_timeout: Duration,
}

impl MemeApiClient {
    /// Create a new client.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            download_timeout: Duration::from_secs(config.download_timeout_secs),
        })
    }

    /// Build the batch URL for a channel and count.
    pub fn batch_url(&self, channel: Option<&str>, count: u32) -> String {
        match channel {
            Some(channel) => format!(
                "{}/{}/{}",
                self.base_url,
                urlencoding::encode(channel),
                count
            ),
            None => format!("{}/{}", self.base_url, count),
        }
    }
}

#[async_trait]
impl MemeSource for MemeApiClient {
    fn name(&self) -> &str {
        "meme-api"
    }

    async fn fetch_batch(
        &self,
        channel: Option<&str>,
        count: u32,
    ) -> Result<Vec<RawItem>, FetchError> {
        let url = self.batch_url(channel, count);
        debug!(%url, "Requesting batch");

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let batch: BatchResponse = serde_json::from_slice(&body).map_err(|e| {
            FetchError::Parse(format!("Failed to parse batch response: {}", e))
        })?;

        Ok(batch.into_items())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> MemeApiClient {
        MemeApiClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_batch_url_default_channel() {
        let client = client("https://meme-api.com/gimme");
        assert_eq!(client.batch_url(None, 20), "https://meme-api.com/gimme/20");
    }

    #[test]
    fn test_batch_url_named_channel() {
        let client = client("https://meme-api.com/gimme/");
        assert_eq!(
            client.batch_url(Some("wholesomememes"), 5),
            "https://meme-api.com/gimme/wholesomememes/5"
        );
    }

    #[test]
    fn test_batch_url_encodes_channel() {
        let client = client("http://localhost:1");
        assert_eq!(
            client.batch_url(Some("a b"), 1),
            "http://localhost:1/a%20b/1"
        );
    }

    #[tokio::test]
    async fn test_fetch_batch_unreachable_is_transport_error() {
        let client = MemeApiClient::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();
        let result = client.fetch_batch(None, 1).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
