//! Configuration for skimmer
//!
//! Runtime configuration is assembled from three layers, later layers
//! winning: built-in defaults, an optional TOML file, and CLI flags.

mod loader;
mod types;

pub use loader::{load_file_config, resolve_config, CliOverrides};
pub use types::{
    CrawlConfig, FetchConfig, FetchSection, FileConfig, LimitsConfig, LimitsSection, OutputConfig,
    OutputSection, DEFAULT_MAX_CACHE_MB,
};
