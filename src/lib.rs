pub mod client;
pub mod config;
pub mod download;
pub mod dump;
pub mod error;

// Re-export commonly used types for easier access in tests
pub use client::{ClientOptions, DEFAULT_BASE_URL, EttvClient};
pub use config::{Config, ConfigManager, OutputFormat};
pub use download::{
    DownloadEngine, DownloadProgress, DumpTransport, EngineOptions, decompress_gzip,
};
pub use dump::{
    DEFAULT_TRACKERS, DumpKind, DumpParser, MagnetBuilder, ParseMode, Torrent, build_magnet,
};
pub use error::{DumpError, DumpResult};
