pub mod magnet;
pub mod parser;
pub mod trackers;

pub use magnet::{MAGNET_PREFIX, MagnetBuilder, build_magnet, encode_tracker};
pub use parser::{DumpParser, EXPECTED_FIELDS, FIELD_DELIMITER};
pub use trackers::{DEFAULT_TRACKERS, default_trackers};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SHA1_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{40}$").expect("static regex is valid"));

/// One line of a dump, plus the magnet link generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torrent {
    pub hash: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub magnet: String,
}

impl Torrent {
    /// Whether `hash` looks like a hex encoded SHA1 info hash.
    ///
    /// Informational only, the parser never rejects a record on this.
    pub fn has_sha1_hash(&self) -> bool {
        SHA1_HEX.is_match(&self.hash)
    }

    /// Set when the line had fewer than four fields.
    pub fn is_partial(&self) -> bool {
        self.link.is_none()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("<untitled>")
    }
}

impl fmt::Display for Torrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_title(), self.hash)?;
        if let Some(category) = &self.category {
            write!(f, " [{}]", category)?;
        }
        Ok(())
    }
}

/// The dumps published under `dumps/` on the remote host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DumpKind {
    Daily,
    Full,
}

impl DumpKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            DumpKind::Daily => "ettv_daily.txt.gz",
            DumpKind::Full => "ettv_full.txt.gz",
        }
    }

    /// Path of the dump relative to the base URL.
    pub fn path(&self) -> String {
        format!("dumps/{}", self.file_name())
    }
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpKind::Daily => write!(f, "daily"),
            DumpKind::Full => write!(f, "full"),
        }
    }
}

/// How the parser treats lines with fewer than four fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Missing trailing fields are left empty.
    #[default]
    Lenient,
    /// A short line fails the whole parse.
    Strict,
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ParseMode::Lenient),
            "strict" => Ok(ParseMode::Strict),
            other => Err(format!(
                "Unknown parse mode '{}', expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Lenient => write!(f, "lenient"),
            ParseMode::Strict => write!(f, "strict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hash: &str) -> Torrent {
        Torrent {
            hash: hash.to_string(),
            title: None,
            category: None,
            link: None,
            magnet: String::new(),
        }
    }

    #[test]
    fn test_dump_kind_paths() {
        assert_eq!(DumpKind::Daily.path(), "dumps/ettv_daily.txt.gz");
        assert_eq!(DumpKind::Full.path(), "dumps/ettv_full.txt.gz");
        assert_eq!(DumpKind::Daily.to_string(), "daily");
    }

    #[test]
    fn test_sha1_hash_detection() {
        assert!(record("0123456789abcdef0123456789ABCDEF01234567").has_sha1_hash());
        assert!(!record("abc123").has_sha1_hash());
        assert!(!record("zz23456789abcdef0123456789abcdef01234567").has_sha1_hash());
    }

    #[test]
    fn test_parse_mode_from_str() {
        assert_eq!("STRICT".parse::<ParseMode>(), Ok(ParseMode::Strict));
        assert_eq!("lenient".parse::<ParseMode>(), Ok(ParseMode::Lenient));
        assert!("loose".parse::<ParseMode>().is_err());
        assert_eq!(ParseMode::default(), ParseMode::Lenient);
    }

    #[test]
    fn test_torrent_display() {
        let mut torrent = record("abc");
        torrent.title = Some("Show S01E01".to_string());
        torrent.category = Some("TV".to_string());
        assert_eq!(torrent.to_string(), "Show S01E01 (abc) [TV]");
    }
}
