use anyhow::{Context, Result};
use console::{Term, style};
use ettv_dump::download::engine::is_gzip;
use ettv_dump::{ConfigManager, DumpParser, ParseMode, decompress_gzip};
use std::path::Path;

use super::output::{OutputSettings, emit};
use crate::cli::OutputArgs;

pub async fn handle_parse(
    config_manager: &ConfigManager,
    file: String,
    output: OutputArgs,
) -> Result<()> {
    let config = config_manager.config();
    let settings = OutputSettings::resolve(&config.output, &output)?;
    let path = Path::new(&file);

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read dump file: {:?}", path))?;

    let text = if is_gzip(&bytes) {
        decompress_gzip(&bytes)
            .await
            .with_context(|| format!("Failed to decompress {:?}", path))?
    } else {
        String::from_utf8(bytes).with_context(|| format!("{:?} is not UTF-8 text", path))?
    };

    let mode = if output.strict {
        ParseMode::Strict
    } else {
        config.parsing.mode
    };
    let torrents = DumpParser::new(&config.magnet.trackers, mode)
        .parse(&text)
        .with_context(|| format!("Failed to parse {:?}", path))?;

    Term::stderr().write_line(&format!(
        "{} Parsed {} records from {}",
        style("✅").green(),
        style(torrents.len()).green().bold(),
        style(path.display()).cyan()
    ))?;

    emit(&torrents, &settings)
}
