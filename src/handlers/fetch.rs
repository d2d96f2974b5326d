use anyhow::{Context, Result};
use console::{Term, style};
use ettv_dump::download::progress::format_bytes;
use ettv_dump::{
    ClientOptions, ConfigManager, DownloadEngine, DownloadProgress, DumpKind, EttvClient,
    ParseMode,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use super::output::{OutputSettings, emit};
use crate::cli::OutputArgs;

pub async fn handle_fetch(
    config_manager: &ConfigManager,
    kind: DumpKind,
    base_url: Option<String>,
    output: OutputArgs,
) -> Result<()> {
    let config = config_manager.config();
    let settings = OutputSettings::resolve(&config.output, &output)?;

    let mut options = config.client_options()?;
    if let Some(url) = base_url {
        options = ClientOptions::new(&url)
            .with_context(|| format!("Invalid base URL: {}", url))?
            .with_trackers(options.trackers)
            .with_parse_mode(options.parse_mode);
    }
    if output.strict {
        options = options.with_parse_mode(ParseMode::Strict);
    }

    let (progress_sender, mut progress_receiver) = mpsc::unbounded_channel();
    let engine = DownloadEngine::with_options(&config.engine_options())
        .context("Failed to create download engine")?
        .with_progress(progress_sender);
    let client = EttvClient::with_transport(options, Arc::new(engine));
    let url = client.dump_url(kind)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.blue} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Fetching {} dump from {}", kind, url));

    let progress_spinner = spinner.clone();
    let progress_task = tokio::spawn(async move {
        while let Some(event) = progress_receiver.recv().await {
            let finished = event.is_finished();
            match event {
                DownloadProgress::Started { total_bytes, .. } => {
                    debug!(?total_bytes, "Download started");
                }
                DownloadProgress::Progress {
                    bytes_received,
                    total_bytes,
                } => {
                    let message = match total_bytes {
                        Some(total) => format!(
                            "Downloading {} / {}",
                            format_bytes(bytes_received),
                            format_bytes(total)
                        ),
                        None => format!("Downloading {}", format_bytes(bytes_received)),
                    };
                    progress_spinner.set_message(message);
                }
                DownloadProgress::Completed {
                    decompressed_bytes,
                    duration,
                } => {
                    debug!(decompressed_bytes, ?duration, "Download finished");
                    progress_spinner.set_message("Parsing dump...");
                }
                DownloadProgress::Failed { .. } => {}
            }
            if finished {
                break;
            }
        }
    });

    let result = client.get(kind).await;
    // dropping the client closes the progress channel
    drop(client);
    let _ = progress_task.await;
    spinner.finish_and_clear();

    let torrents = result.with_context(|| format!("Failed to fetch {} dump from {}", kind, url))?;

    let term = Term::stderr();
    let odd_hashes = torrents.iter().filter(|t| !t.has_sha1_hash()).count();
    term.write_line(&format!(
        "{} Parsed {} records from the {} dump",
        style("✅").green(),
        style(torrents.len()).green().bold(),
        kind
    ))?;
    if odd_hashes > 0 {
        term.write_line(&format!(
            "{} {} records have a hash that is not 40 hex characters",
            style("⚠️").yellow(),
            odd_hashes
        ))?;
    }

    emit(&torrents, &settings)
}
