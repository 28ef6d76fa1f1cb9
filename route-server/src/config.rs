//! Server configuration.
//!
//! Built once in `main` from command-line flags and environment variables,
//! then handed to the collaborators that need it. The query engine itself
//! takes no configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default listening address.
const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);

/// Default number of stop records per `/fetch` page.
const DEFAULT_PAGE_SIZE: usize = 15;

/// Default number of rows inserted concurrently during ingestion.
const DEFAULT_MAX_CONCURRENT: usize = 20;

/// Default timetable CSV file name.
const DEFAULT_CSV_PATH: &str = "Indian_railway1.csv";

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric setting must be at least one
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Timetable store settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// JSON snapshot file. `None` keeps the timetable in memory only.
    pub snapshot_path: Option<PathBuf>,

    /// Stop records returned per page by the listing read path.
    pub page_size: usize,
}

impl StoreConfig {
    /// In-memory store with the default page size.
    pub fn in_memory() -> Self {
        Self {
            snapshot_path: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Persist the timetable to a JSON snapshot file.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// CSV ingestion settings.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Timetable CSV to load.
    pub csv_path: PathBuf,

    /// Maximum rows inserted concurrently.
    pub max_concurrent: usize,

    /// Whether the first CSV row is a header.
    pub has_headers: bool,
}

impl IngestConfig {
    /// Create an ingestion config for the given CSV file.
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            has_headers: true,
        }
    }

    /// Set maximum concurrent inserts.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set whether the CSV starts with a header row.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_PATH)
    }
}

/// Query response cache settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached responses.
    pub ttl: Duration,

    /// Maximum number of cached responses.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Whether to ingest the CSV before serving.
    pub insert_on_start: bool,

    pub store: StoreConfig,
    pub ingest: IngestConfig,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Check settings that would make the server misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.page_size == 0 {
            return Err(ConfigError::Zero("page size"));
        }
        if self.ingest.max_concurrent == 0 {
            return Err(ConfigError::Zero("max concurrent inserts"));
        }
        if self.cache.max_capacity == 0 {
            return Err(ConfigError::Zero("cache capacity"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_ADDR),
            static_dir: PathBuf::from("static"),
            insert_on_start: false,
            store: StoreConfig::default(),
            ingest: IngestConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
