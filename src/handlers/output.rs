use anyhow::{Context, Result};
use console::{Alignment, pad_str, style};
use ettv_dump::config::OutputConfig;
use ettv_dump::{OutputFormat, Torrent};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::cli::OutputArgs;

const HASH_WIDTH: usize = 40;
const CATEGORY_WIDTH: usize = 12;
const TITLE_WIDTH: usize = 70;

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub pretty: bool,
    pub limit: Option<usize>,
    pub destination: Option<PathBuf>,
}

impl OutputSettings {
    /// Command line flags win over the `[output]` config section.
    pub fn resolve(config: &OutputConfig, args: &OutputArgs) -> Result<Self> {
        let format = match &args.format {
            Some(format) => format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
            None => config.format,
        };

        Ok(Self {
            format,
            pretty: args.pretty || config.pretty,
            limit: args.limit,
            destination: args.output.as_ref().map(PathBuf::from),
        })
    }

    fn select<'a>(&self, records: &'a [Torrent]) -> &'a [Torrent] {
        match self.limit {
            Some(limit) if limit < records.len() => &records[..limit],
            _ => records,
        }
    }
}

/// Write records to the configured destination.
pub fn emit(records: &[Torrent], settings: &OutputSettings) -> Result<()> {
    let selected = settings.select(records);

    match &settings.destination {
        Some(path) => {
            let content = render(selected, settings.format, settings.pretty, false)?;
            fs::write(path, content)
                .with_context(|| format!("Failed to write records to {:?}", path))?;
        }
        None => {
            let content = render(selected, settings.format, settings.pretty, true)?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write records to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

pub fn render(
    records: &[Torrent],
    format: OutputFormat,
    pretty: bool,
    styled: bool,
) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            out = if pretty {
                serde_json::to_string_pretty(records)?
            } else {
                serde_json::to_string(records)?
            };
            out.push('\n');
        }
        OutputFormat::Jsonl => {
            for record in records {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
        }
        OutputFormat::Table => {
            let header = format!(
                "{}  {}  {}",
                pad_str("HASH", HASH_WIDTH, Alignment::Left, None),
                pad_str("CATEGORY", CATEGORY_WIDTH, Alignment::Left, None),
                "TITLE"
            );
            if styled {
                out.push_str(&style(header).bold().to_string());
            } else {
                out.push_str(&header);
            }
            out.push('\n');

            for record in records {
                out.push_str(&format!(
                    "{}  {}  {}\n",
                    pad_str(&record.hash, HASH_WIDTH, Alignment::Left, Some("…")),
                    pad_str(
                        record.category.as_deref().unwrap_or("-"),
                        CATEGORY_WIDTH,
                        Alignment::Left,
                        Some("…")
                    ),
                    pad_str(record.display_title(), TITLE_WIDTH, Alignment::Left, Some("…"))
                        .trim_end()
                ));
            }
        }
    }

    Ok(out)
}
