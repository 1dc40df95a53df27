//! Command line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use memehoard_core::Config;

/// Fetch, catalog and web-optimize meme images.
#[derive(Debug, Parser)]
#[command(name = "memehoard", version, about)]
pub struct Cli {
    /// Config file (default: ./memehoard.toml when present)
    #[arg(long, short, global = true, env = "MEMEHOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding raw assets
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Catalog JSON document
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download memes from upstream into numbered slots
    Fetch(FetchArgs),
    /// Write WebP derivatives and thumbnails, backfilling the catalog
    Optimize,
    /// Generate solid-colour placeholder images
    Generate(GenerateArgs),
}

#[derive(Debug, Default, Args)]
pub struct FetchArgs {
    /// Desired total number of memes (including earlier runs)
    #[arg(long)]
    pub target: Option<u32>,

    /// Items requested per upstream call
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Comma-separated channel list; empty means the mixed channel
    #[arg(long, value_delimiter = ',')]
    pub channels: Option<Vec<String>>,

    /// Minimum upvotes (inclusive)
    #[arg(long)]
    pub min_upvotes: Option<u64>,

    /// Keep animated formats
    #[arg(long, conflicts_with = "exclude_animated")]
    pub include_animated: bool,

    /// Drop animated formats
    #[arg(long)]
    pub exclude_animated: bool,

    /// Consecutive batches without progress before stopping
    #[arg(long)]
    pub stagnation_limit: Option<u32>,
}

#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Number of placeholders
    #[arg(long)]
    pub count: Option<u32>,

    /// Edge length in pixels
    #[arg(long)]
    pub size: Option<u32>,
}

impl Cli {
    /// Apply global path overrides.
    pub fn apply_paths(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(path) = &self.catalog {
            config.paths.catalog_path = path.clone();
        }
    }
}

impl FetchArgs {
    /// Overlay flags onto the `[fetch]` section.
    pub fn apply(&self, config: &mut Config) {
        let fetch = &mut config.fetch;
        if let Some(target) = self.target {
            fetch.target_count = target;
        }
        if let Some(batch_size) = self.batch_size {
            fetch.batch_size = batch_size;
        }
        if let Some(channels) = &self.channels {
            fetch.channels = channels
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }
        if let Some(min_upvotes) = self.min_upvotes {
            fetch.min_upvotes = min_upvotes;
        }
        if self.include_animated {
            fetch.exclude_animated = false;
        }
        if self.exclude_animated {
            fetch.exclude_animated = true;
        }
        if let Some(limit) = self.stagnation_limit {
            fetch.stagnation_limit = limit;
        }
    }
}

impl GenerateArgs {
    /// Overlay flags onto the `[placeholder]` section.
    pub fn apply(&self, config: &mut Config) {
        if let Some(count) = self.count {
            config.placeholder.count = count;
        }
        if let Some(size) = self.size {
            config.placeholder.size = size;
        }
    }
}
