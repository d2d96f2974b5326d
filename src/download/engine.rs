use async_compression::tokio::bufread::GzipDecoder;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::Client;
use std::io;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tracing::{debug, info, warn};
use url::Url;

use super::{DownloadProgress, DumpTransport};
use crate::error::{DumpError, DumpResult};

pub const DEFAULT_USER_AGENT: &str = concat!("ettv-dump/", env!("CARGO_PKG_VERSION"));

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub user_agent: String,
    /// Whole-request timeout. `None` waits for as long as the server does.
    pub timeout: Option<Duration>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// HTTP transport: one GET per call, body decoded as a gzip stream.
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    client: Client,
    progress_sender: Option<mpsc::UnboundedSender<DownloadProgress>>,
}

impl DownloadEngine {
    pub fn new() -> DumpResult<Self> {
        Self::with_options(&EngineOptions::default())
    }

    pub fn with_options(options: &EngineOptions) -> DumpResult<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(DumpError::HttpClient)?;

        Ok(Self {
            client,
            progress_sender: None,
        })
    }

    /// Report byte counts on `sender` while a body is streaming in.
    pub fn with_progress(mut self, sender: mpsc::UnboundedSender<DownloadProgress>) -> Self {
        self.progress_sender = Some(sender);
        self
    }

    fn report(&self, event: DownloadProgress) {
        if let Some(sender) = &self.progress_sender {
            let _ = sender.send(event);
        }
    }

    async fn fetch_attempt(&self, url: &Url) -> DumpResult<String> {
        let start_time = Instant::now();

        let response = self.client.get(url.clone()).send().await?;

        // The status code is not acted on: whatever body came back is fed
        // to the decoder, and an error page fails there.
        debug!(status = %response.status(), "Dump response received");

        let total_bytes = response.content_length();
        self.report(DownloadProgress::Started {
            url: url.to_string(),
            total_bytes,
        });

        let progress = self.progress_sender.clone();
        let mut bytes_received = 0u64;
        let body = response
            .bytes_stream()
            .inspect_ok(move |chunk| {
                bytes_received += chunk.len() as u64;
                if let Some(sender) = &progress {
                    let _ = sender.send(DownloadProgress::Progress {
                        bytes_received,
                        total_bytes,
                    });
                }
            })
            .map_err(io::Error::other);

        let text = read_gzip(StreamReader::new(body)).await?;

        self.report(DownloadProgress::Completed {
            decompressed_bytes: text.len() as u64,
            duration: start_time.elapsed(),
        });

        Ok(text)
    }
}

#[async_trait]
impl DumpTransport for DownloadEngine {
    async fn fetch_text(&self, url: &Url) -> DumpResult<String> {
        info!(%url, "Fetching dump");

        match self.fetch_attempt(url).await {
            Ok(text) => {
                debug!(bytes = text.len(), "Dump decompressed");
                Ok(text)
            }
            Err(e) => {
                warn!(%url, error = %e, "Dump fetch failed");
                self.report(DownloadProgress::Failed {
                    url: url.to_string(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

/// Decompress an in-memory gzip buffer, e.g. a dump saved to disk.
pub async fn decompress_gzip(bytes: &[u8]) -> DumpResult<String> {
    read_gzip(bytes).await
}

/// Whether `bytes` starts with the gzip member header.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

async fn read_gzip<R: AsyncBufRead>(reader: R) -> DumpResult<String> {
    let mut decoder = GzipDecoder::new(reader);
    // dumps may be concatenated gzip members
    decoder.multiple_members(true);
    tokio::pin!(decoder);

    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .await
        .map_err(DumpError::from_read)?;

    Ok(String::from_utf8(decompressed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::GzipEncoder;

    fn gzip(text: &[u8]) -> Vec<u8> {
        tokio_test::block_on(async {
            let mut encoder = GzipEncoder::new(text);
            let mut out = Vec::new();
            encoder.read_to_end(&mut out).await.unwrap();
            out
        })
    }

    #[test]
    fn test_decompress_round_trip() {
        let dump = "abc|Title|TV|https://example.org/1\n";
        let text = tokio_test::block_on(decompress_gzip(&gzip(dump.as_bytes()))).unwrap();
        assert_eq!(text, dump);
    }

    #[test]
    fn test_decompress_multiple_members() {
        let mut bytes = gzip(b"a|A|c|l\n");
        bytes.extend(gzip(b"b|B|c|l\n"));

        let text = tokio_test::block_on(decompress_gzip(&bytes)).unwrap();
        assert_eq!(text, "a|A|c|l\nb|B|c|l\n");
    }

    #[test]
    fn test_corrupt_gzip_is_decompression_error() {
        let err = tokio_test::block_on(decompress_gzip(b"<html>404 Not Found</html>"))
            .unwrap_err();
        assert!(err.is_decompression(), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_truncated_gzip_is_decompression_error() {
        let bytes = gzip(b"a|A|c|l\nb|B|c|l\n");
        let err = tokio_test::block_on(decompress_gzip(&bytes[..bytes.len() / 2])).unwrap_err();
        assert!(err.is_decompression());
    }

    #[test]
    fn test_non_utf8_body_is_encoding_error() {
        let bytes = gzip(&[0x66, 0xff, 0xfe, 0x0a]);
        let err = tokio_test::block_on(decompress_gzip(&bytes)).unwrap_err();
        assert!(matches!(err, DumpError::Encoding(_)));
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(&gzip(b"x")));
        assert!(!is_gzip(b"abc|Title"));
        assert!(!is_gzip(&[]));
    }

    #[test]
    fn test_engine_creation() {
        let options = EngineOptions {
            user_agent: "test-agent".to_string(),
            timeout: Some(Duration::from_secs(5)),
        };
        assert!(DownloadEngine::with_options(&options).is_ok());
        assert_eq!(EngineOptions::default().timeout, None);
    }
}
