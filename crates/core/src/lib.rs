pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod optimizer;
pub mod placeholder;
pub mod testing;
pub mod upstream;

pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogStore, ContentFlags, FileMatch};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, FetchConfig, OptimizeConfig, PathsConfig, PlaceholderConfig, UpstreamConfig,
};
pub use fetcher::{FetchReport, Fetcher, StopReason};
pub use optimizer::{OptimizeError, OptimizeReport, Optimizer};
pub use placeholder::{generate as generate_placeholders, PlaceholderError};
pub use upstream::{FetchError, MemeApiClient, MemeSource, RawItem};
