use serde::Deserialize;
use std::path::PathBuf;

/// Default cache threshold in MiB before the buffer flushes to disk
pub const DEFAULT_MAX_CACHE_MB: u64 = 30;

/// Fully-resolved runtime configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub fetch: FetchConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

/// HTTP fetch behavior
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Traversal limits
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum number of concurrent page fetches
    pub concurrency: usize,

    /// Stop dispatching after this many fetches; 0 means unbounded
    pub max_pages: u64,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory output files are written into
    pub directory: PathBuf,

    /// Cache threshold in bytes before the buffer flushes
    pub max_cache_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("skimmer/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_pages: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            max_cache_bytes: DEFAULT_MAX_CACHE_MB * 1024 * 1024,
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            limits: LimitsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Shape of the optional TOML configuration file
///
/// Every field is optional; missing values fall back to the defaults above
/// (unless a CLI flag overrides them).
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub fetch: FetchSection,

    #[serde(default)]
    pub limits: LimitsSection,

    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FetchSection {
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LimitsSection {
    pub concurrency: Option<usize>,

    #[serde(rename = "max-pages")]
    pub max_pages: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputSection {
    pub directory: Option<PathBuf>,

    #[serde(rename = "max-cache-mb")]
    pub max_cache_mb: Option<u64>,
}
