//! Fetch loop types.

use std::collections::HashSet;

use serde::Serialize;

use super::naming::is_animated;
use crate::catalog::Catalog;
use crate::config::FetchConfig;
use crate::upstream::RawItem;

/// Why the fetch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The catalog holds `target_count` slots.
    TargetReached,
    /// Upstream answered with no items at all.
    Exhausted,
    /// `stagnation_limit` consecutive batches retained nothing.
    Stagnant,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StopReason::TargetReached => "target reached",
            StopReason::Exhausted => "upstream exhausted",
            StopReason::Stagnant => "stagnant",
        };
        f.write_str(s)
    }
}

/// Why an item was dropped before download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Animated,
    BelowMinUpvotes,
    Duplicate,
}

/// Apply the filters in precedence order: animated, upvotes, dedup.
pub fn skip_reason(
    item: &RawItem,
    config: &FetchConfig,
    seen: &HashSet<String>,
) -> Option<SkipReason> {
    if config.exclude_animated && is_animated(&item.url) {
        return Some(SkipReason::Animated);
    }
    if item.upvote_count < config.min_upvotes {
        return Some(SkipReason::BelowMinUpvotes);
    }
    if seen.contains(&item.url) {
        return Some(SkipReason::Duplicate);
    }
    None
}

/// Order a batch by upvotes, highest first, keeping upstream order on ties.
pub fn rank_items(items: &mut [RawItem]) {
    items.sort_by(|a, b| b.upvote_count.cmp(&a.upvote_count));
}

/// Outcome of a fetch run.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub stop: StopReason,
    /// The catalog as persisted after the last batch.
    pub catalog: Catalog,
    /// Upstream batch calls made.
    pub batches: u32,
    /// Assets newly retained by this run.
    pub retained: u32,
    /// Items dropped by the filters.
    pub skipped: u32,
    /// Downloads or writes that failed.
    pub failed_downloads: u32,
    /// Batch calls that failed and were treated as empty.
    pub failed_batches: u32,
}
