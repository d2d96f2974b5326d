use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::download::{DownloadEngine, DumpTransport, EngineOptions};
use crate::dump::{DumpKind, DumpParser, MagnetBuilder, ParseMode, Torrent, default_trackers};
use crate::error::{DumpError, DumpResult};

pub const DEFAULT_BASE_URL: &str = "https://www.ettv.tv/";

/// Settings captured by an [`EttvClient`] when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub base_url: Url,
    pub trackers: Vec<String>,
    pub parse_mode: ParseMode,
}

impl ClientOptions {
    /// Options pointing at `base_url`. A missing trailing `/` is added so
    /// dump paths are appended to the base rather than replacing its last
    /// segment.
    pub fn new(base_url: &str) -> DumpResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            trackers: default_trackers(),
            parse_mode: ParseMode::default(),
        })
    }

    pub fn with_trackers(mut self, trackers: Vec<String>) -> Self {
        self.trackers = trackers;
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn strict(self) -> Self {
        self.with_parse_mode(ParseMode::Strict)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            trackers: default_trackers(),
            parse_mode: ParseMode::default(),
        }
    }
}

pub fn parse_base_url(base_url: &str) -> DumpResult<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&normalized).map_err(|source| DumpError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })
}

/// Fetches ETTV dumps and turns them into [`Torrent`] records.
///
/// Cheap to clone and safe to share; every call is independent.
#[derive(Debug, Clone)]
pub struct EttvClient {
    options: ClientOptions,
    transport: Arc<dyn DumpTransport>,
}

impl EttvClient {
    pub fn new(options: ClientOptions) -> DumpResult<Self> {
        Self::with_engine_options(options, &EngineOptions::default())
    }

    pub fn with_engine_options(
        options: ClientOptions,
        engine_options: &EngineOptions,
    ) -> DumpResult<Self> {
        let engine = DownloadEngine::with_options(engine_options)?;
        Ok(Self::with_transport(options, Arc::new(engine)))
    }

    pub fn with_transport(options: ClientOptions, transport: Arc<dyn DumpTransport>) -> Self {
        Self { options, transport }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn trackers(&self) -> &[String] {
        &self.options.trackers
    }

    pub fn dump_url(&self, kind: DumpKind) -> DumpResult<Url> {
        let path = kind.path();
        self.options
            .base_url
            .join(&path)
            .map_err(|source| DumpError::InvalidUrl { url: path, source })
    }

    pub async fn get_daily(&self) -> DumpResult<Vec<Torrent>> {
        self.get(DumpKind::Daily).await
    }

    pub async fn get_full(&self) -> DumpResult<Vec<Torrent>> {
        self.get(DumpKind::Full).await
    }

    pub async fn get(&self, kind: DumpKind) -> DumpResult<Vec<Torrent>> {
        let url = self.dump_url(kind)?;
        let text = self.transport.fetch_text(&url).await?;
        let torrents = self.parse(&text)?;
        info!(dump = %kind, records = torrents.len(), "Dump parsed");
        Ok(torrents)
    }

    /// Parse already decompressed dump text with this client's trackers and
    /// parse mode.
    pub fn parse(&self, text: &str) -> DumpResult<Vec<Torrent>> {
        DumpParser::new(&self.options.trackers, self.options.parse_mode).parse(text)
    }

    pub fn magnet(&self, hash: &str, title: Option<&str>) -> String {
        MagnetBuilder::new(&self.options.trackers).build(hash, title)
    }
}
