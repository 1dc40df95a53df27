use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub optimize: OptimizeConfig,
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

/// Filesystem locations shared by every command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory receiving raw asset files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// JSON catalog document.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            catalog_path: default_catalog_path(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets/memes")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("memes.json")
}

/// Upstream meme API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Endpoint base, requests go to `<base>/<channel>/<count>` or `<base>/<count>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as the User-Agent header on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Timeout for the metadata batch call, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Timeout for a single image download, in seconds.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://meme-api.com/gimme".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_download_timeout() -> u64 {
    20
}

/// Fetch loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Desired total number of retained assets (including previous runs).
    #[serde(default = "default_target_count")]
    pub target_count: u32,
    /// Items requested per upstream call.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Channels to round-robin through. Empty means the mixed default channel.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Inclusive upvote threshold.
    #[serde(default)]
    pub min_upvotes: u64,
    /// Drop assets whose URL points at an animated format.
    #[serde(default = "default_exclude_animated")]
    pub exclude_animated: bool,
    /// Consecutive batches without a new asset tolerated before stopping.
    #[serde(default = "default_stagnation_limit")]
    pub stagnation_limit: u32,
    /// Politeness delay between two downloads (milliseconds).
    #[serde(default = "default_item_delay")]
    pub item_delay_ms: u64,
    /// Delay between two upstream batches (milliseconds).
    #[serde(default = "default_batch_delay")]
    pub batch_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            target_count: default_target_count(),
            batch_size: default_batch_size(),
            channels: Vec::new(),
            min_upvotes: 0,
            exclude_animated: default_exclude_animated(),
            stagnation_limit: default_stagnation_limit(),
            item_delay_ms: default_item_delay(),
            batch_delay_ms: default_batch_delay(),
        }
    }
}

fn default_target_count() -> u32 {
    500
}

fn default_batch_size() -> u32 {
    50
}

fn default_exclude_animated() -> bool {
    true
}

fn default_stagnation_limit() -> u32 {
    5
}

fn default_item_delay() -> u64 {
    200
}

fn default_batch_delay() -> u64 {
    1000
}

/// Image post-processing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptimizeConfig {
    /// Longest side of the resized derivative, in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// WebP quality of the resized derivative (0-100).
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Edge of the square thumbnail, in pixels.
    #[serde(default = "default_thumb_size")]
    pub thumb_size: u32,
    /// WebP quality of the thumbnail (0-100).
    #[serde(default = "default_thumb_quality")]
    pub thumb_quality: u8,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            quality: default_quality(),
            thumb_size: default_thumb_size(),
            thumb_quality: default_thumb_quality(),
        }
    }
}

fn default_max_dimension() -> u32 {
    1200
}

fn default_quality() -> u8 {
    80
}

fn default_thumb_size() -> u32 {
    400
}

fn default_thumb_quality() -> u8 {
    60
}

/// Placeholder generator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaceholderConfig {
    /// Number of images to synthesize.
    #[serde(default = "default_placeholder_count")]
    pub count: u32,
    /// Edge of the square placeholder, in pixels.
    #[serde(default = "default_placeholder_size")]
    pub size: u32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            count: default_placeholder_count(),
            size: default_placeholder_size(),
        }
    }
}

fn default_placeholder_count() -> u32 {
    500
}

fn default_placeholder_size() -> u32 {
    800
}
