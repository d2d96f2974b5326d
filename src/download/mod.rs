pub mod engine;
pub mod progress;

pub use engine::{DownloadEngine, EngineOptions, decompress_gzip};
pub use progress::DownloadProgress;

use async_trait::async_trait;
use url::Url;

use crate::error::DumpResult;

/// Retrieves a gzip compressed dump and hands back the decompressed text.
#[async_trait]
pub trait DumpTransport: Send + Sync + std::fmt::Debug {
    /// Fetch `url` and return the whole decompressed body. Any failure
    /// rejects the call; partial bodies are never returned.
    async fn fetch_text(&self, url: &Url) -> DumpResult<String>;
}
