//! The incremental fetch-and-catalog loop.
//!
//! Pages through a [`MemeSource`], drops animated, low-score and already
//! cataloged items, writes survivors into numbered slots and rewrites the
//! catalog after every batch. Stops when the target is reached, when upstream
//! returns nothing, or after too many batches without progress.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::naming::{destination_extension, slot_file_name};
use super::types::{rank_items, skip_reason, FetchReport, StopReason};
use crate::catalog::{Catalog, CatalogEntry, CatalogStore};
use crate::config::FetchConfig;
use crate::upstream::{FetchError, MemeSource, RawItem};

/// Drives the fetch loop for one run.
pub struct Fetcher {
    config: FetchConfig,
    source: Arc<dyn MemeSource>,
    store: CatalogStore,
    output_dir: PathBuf,
}

impl Fetcher {
    /// Create a new fetcher.
    pub fn new(
        config: FetchConfig,
        source: Arc<dyn MemeSource>,
        store: CatalogStore,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            output_dir: output_dir.into(),
        }
    }

    /// Run until a stop condition is met, returning the run report (including
    /// the persisted catalog).
    pub async fn run(&self, mut catalog: Catalog) -> FetchReport {
        let target = self.config.target_count;
        let mut seen = catalog.urls();
        let mut round: usize = 0;
        let mut stagnant_batches: u32 = 0;

        let mut batches = 0;
        let mut retained = 0;
        let mut skipped = 0;
        let mut failed_downloads = 0;
        let mut failed_batches = 0;

        if let Err(e) = fs::create_dir_all(&self.output_dir).await {
            warn!(dir = %self.output_dir.display(), error = %e, "Failed to create output directory");
        }

        info!(
            source = self.source.name(),
            target,
            already = catalog.count,
            channels = ?self.config.channels,
            "Starting fetch"
        );

        let stop = loop {
            let next_slot = catalog.next_slot();
            if next_slot > target {
                break StopReason::TargetReached;
            }
            let remaining = target - next_slot + 1;
            let request_size = self.config.batch_size.min(remaining);
            let channel = self.select_channel(&mut round);

            batches += 1;
            let (mut items, exhausted) = match self.source.fetch_batch(channel, request_size).await
            {
                Ok(items) => {
                    let empty = items.is_empty();
                    (items, empty)
                }
                Err(e) => {
                    warn!(
                        batch = batches,
                        channel = channel.unwrap_or("<mixed>"),
                        error = %e,
                        "Batch request failed, treating as empty"
                    );
                    failed_batches += 1;
                    (Vec::new(), false)
                }
            };
            debug!(
                batch = batches,
                channel = channel.unwrap_or("<mixed>"),
                requested = request_size,
                received = items.len(),
                "Batch received"
            );

            rank_items(&mut items);

            let mut new_in_batch = 0;
            for item in items {
                if catalog.next_slot() > target {
                    break;
                }
                if let Some(reason) = skip_reason(&item, &self.config, &seen) {
                    debug!(url = %item.url, ?reason, "Skipping item");
                    skipped += 1;
                    continue;
                }

                let slot = catalog.next_slot();
                match self.retain(&item, slot).await {
                    Ok(entry) => {
                        info!(slot, url = %item.url, "Retained meme");
                        seen.insert(item.url.clone());
                        catalog.entries.push(entry);
                        catalog.count = slot;
                        new_in_batch += 1;
                        retained += 1;

                        if catalog.next_slot() <= target && self.config.item_delay_ms > 0 {
                            sleep(Duration::from_millis(self.config.item_delay_ms)).await;
                        }
                    }
                    Err(e) => {
                        warn!(slot, url = %item.url, error = %e, "Download failed, skipping");
                        failed_downloads += 1;
                    }
                }
            }

            self.store.save_or_warn(&catalog).await;

            if new_in_batch > 0 {
                stagnant_batches = 0;
            } else {
                stagnant_batches += 1;
            }

            if exhausted {
                break StopReason::Exhausted;
            }
            if catalog.next_slot() > target {
                break StopReason::TargetReached;
            }
            if stagnant_batches >= self.config.stagnation_limit {
                break StopReason::Stagnant;
            }

            if self.config.batch_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.batch_delay_ms)).await;
            }
        };

        info!(
            %stop,
            batches,
            retained,
            skipped,
            failed_downloads,
            total = catalog.count,
            "Fetch finished"
        );

        FetchReport {
            stop,
            catalog,
            batches,
            retained,
            skipped,
            failed_downloads,
            failed_batches,
        }
    }

    /// Pick the channel for the next batch, advancing the round-robin index.
    fn select_channel(&self, round: &mut usize) -> Option<&str> {
        if self.config.channels.is_empty() {
            return None;
        }
        let channel = &self.config.channels[*round % self.config.channels.len()];
        *round += 1;
        Some(channel.as_str())
    }

    /// Download an item into `slot` and build its catalog entry.
    async fn retain(&self, item: &RawItem, slot: u32) -> Result<CatalogEntry, FetchError> {
        let file_name = slot_file_name(slot, destination_extension(&item.url));
        let bytes = self.source.download(&item.url).await?;

        let path = self.output_dir.join(&file_name);
        fs::write(&path, &bytes)
            .await
            .map_err(|e| FetchError::Filesystem {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(CatalogEntry {
            source_url: Some(item.url.clone()),
            channel: item.channel.clone(),
            title: item.title.clone(),
            author: item.author.clone(),
            post_link: item.post_link.clone(),
            file: Some(file_name),
            local_path: None,
            thumb_path: None,
            upvote_count: item.upvote_count,
            flags: item.flags,
            fetched_at: Some(Utc::now()),
        })
    }
}
