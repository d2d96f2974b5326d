use tracing::debug;

use super::magnet::MagnetBuilder;
use super::{ParseMode, Torrent};
use crate::error::{DumpError, DumpResult};

pub const FIELD_DELIMITER: char = '|';

/// `hash|title|category|link`
pub const EXPECTED_FIELDS: usize = 4;

/// Turns decompressed dump text into [`Torrent`] records.
#[derive(Debug, Clone, Copy)]
pub struct DumpParser<'a> {
    magnets: MagnetBuilder<'a>,
    mode: ParseMode,
}

impl<'a> DumpParser<'a> {
    pub fn new(trackers: &'a [String], mode: ParseMode) -> Self {
        Self {
            magnets: MagnetBuilder::new(trackers),
            mode,
        }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse the whole dump. In strict mode the first short line aborts the
    /// parse and nothing is returned.
    pub fn parse(&self, text: &str) -> DumpResult<Vec<Torrent>> {
        let torrents = self.parse_iter(text).collect::<DumpResult<Vec<_>>>()?;
        let partial = torrents.iter().filter(|t| t.is_partial()).count();
        debug!(records = torrents.len(), partial, mode = %self.mode, "Parsed dump");
        Ok(torrents)
    }

    /// Lazily parse the dump, one item per non-empty line, in input order.
    /// Only empty lines are skipped; a whitespace-only line is parsed like
    /// any other (and is short).
    pub fn parse_iter<'t>(
        &'t self,
        text: &'t str,
    ) -> impl Iterator<Item = DumpResult<Torrent>> + 't {
        text.split('\n')
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
            .filter(|(_, line)| !line.is_empty())
            .map(move |(line_no, line)| self.parse_line(line_no, line))
    }

    /// Map one line's fields onto a record. `line_no` is 1-based and only
    /// used for error reporting.
    pub fn parse_line(&self, line_no: usize, line: &str) -> DumpResult<Torrent> {
        let mut fields = line.split(FIELD_DELIMITER);
        // split always yields at least one item
        let hash = fields.next().unwrap_or_default().to_string();
        let title = fields.next().map(str::to_string);
        let category = fields.next().map(str::to_string);
        let link = fields.next().map(str::to_string);

        let found = [&title, &category, &link]
            .iter()
            .filter(|field| field.is_some())
            .count()
            + 1;
        if found < EXPECTED_FIELDS {
            match self.mode {
                ParseMode::Strict => {
                    return Err(DumpError::Parse {
                        line: line_no,
                        reason: format!(
                            "expected {} fields, found {}",
                            EXPECTED_FIELDS, found
                        ),
                    });
                }
                ParseMode::Lenient => {
                    debug!(line = line_no, found, "Short dump line, missing fields left empty");
                }
            }
        }

        let magnet = self.magnets.build(&hash, title.as_deref());

        Ok(Torrent {
            hash,
            title,
            category,
            link,
            magnet,
        })
    }
}
