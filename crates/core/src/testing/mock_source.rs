//! Mock meme source for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::upstream::{FetchError, MemeSource, RawItem};

/// A recorded batch request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// The requested channel (`None` = mixed).
    pub channel: Option<String>,
    /// The requested item count.
    pub count: u32,
}

/// A scripted answer to one batch request.
#[derive(Debug, Clone)]
enum ScriptedBatch {
    Items(Vec<RawItem>),
    Fail(String),
}

/// Mock implementation of the MemeSource trait.
///
/// Provides controllable behavior for testing:
/// - Scripted batches, answered in order
/// - An optional repeating batch once the script runs out
/// - Downloadable URLs with fixed bytes; anything else answers 404
/// - Recorded requests and downloads for assertions
///
/// With nothing scripted, a batch request answers with an empty list.
///
/// # Example
///
/// ```rust,ignore
/// use memehoard_core::testing::{fixtures, MockMemeSource};
///
/// let source = MockMemeSource::new();
/// source.push_batch(fixtures::raw_items(5)).await;
/// source.serve_all(&fixtures::raw_items(5)).await;
///
/// let items = source.fetch_batch(None, 5).await?;
/// assert_eq!(items.len(), 5);
/// assert_eq!(source.request_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMemeSource {
    /// Batches answered in order.
    script: Arc<RwLock<VecDeque<ScriptedBatch>>>,
    /// Answer used once the script is empty.
    repeating: Arc<RwLock<Option<Vec<RawItem>>>>,
    /// URL -> bytes served by `download`.
    downloads: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Recorded batch requests.
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    /// Recorded download attempts.
    downloaded: Arc<RwLock<Vec<String>>>,
}

impl MockMemeSource {
    /// Create a new mock source with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch answer.
    pub async fn push_batch(&self, items: Vec<RawItem>) {
        self.script
            .write()
            .await
            .push_back(ScriptedBatch::Items(items));
    }

    /// Queue a failing batch answer.
    pub async fn push_failure(&self, message: &str) {
        self.script
            .write()
            .await
            .push_back(ScriptedBatch::Fail(message.to_string()));
    }

    /// Answer every request with these items once the script is empty.
    pub async fn set_repeating(&self, items: Vec<RawItem>) {
        *self.repeating.write().await = Some(items);
    }

    /// Make a URL downloadable.
    pub async fn add_download(&self, url: &str, bytes: Vec<u8>) {
        self.downloads.write().await.insert(url.to_string(), bytes);
    }

    /// Make every item's URL downloadable with small placeholder bytes.
    pub async fn serve_all(&self, items: &[RawItem]) {
        let mut downloads = self.downloads.write().await;
        for item in items {
            downloads.insert(item.url.clone(), item.url.as_bytes().to_vec());
        }
    }

    /// Get recorded batch requests.
    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of batch requests made.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Get every URL a download was attempted for.
    pub async fn recorded_downloads(&self) -> Vec<String> {
        self.downloaded.read().await.clone()
    }
}

#[async_trait]
impl MemeSource for MockMemeSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_batch(
        &self,
        channel: Option<&str>,
        count: u32,
    ) -> Result<Vec<RawItem>, FetchError> {
        self.requests.write().await.push(RecordedRequest {
            channel: channel.map(String::from),
            count,
        });

        let scripted = self.script.write().await.pop_front();
        match scripted {
            Some(ScriptedBatch::Items(items)) => Ok(items),
            Some(ScriptedBatch::Fail(message)) => Err(FetchError::Parse(message)),
            None => Ok(self.repeating.read().await.clone().unwrap_or_default()),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.downloaded.write().await.push(url.to_string());

        match self.downloads.read().await.get(url) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
