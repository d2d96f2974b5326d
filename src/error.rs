use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Network Error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decompression Error: {0}")]
    Decompression(#[source] io::Error),

    #[error("Invalid UTF-8 in dump: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("Parse Error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub type DumpResult<T> = Result<T, DumpError>;

impl DumpError {
    /// Sort an error raised while reading the decoded body stream.
    ///
    /// Transport errors are tunnelled through `io::Error` by the stream
    /// adapter; anything else came from the gzip decoder itself.
    pub(crate) fn from_read(err: io::Error) -> Self {
        let is_transport = err
            .get_ref()
            .is_some_and(|inner| inner.is::<reqwest::Error>());
        if !is_transport {
            return DumpError::Decompression(err);
        }

        match err.into_inner().map(|inner| inner.downcast::<reqwest::Error>()) {
            Some(Ok(transport)) => DumpError::Network(*transport),
            Some(Err(other)) => DumpError::Decompression(io::Error::other(other)),
            None => DumpError::Decompression(io::Error::from(io::ErrorKind::Other)),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, DumpError::Network(_))
    }

    pub fn is_decompression(&self) -> bool {
        matches!(self, DumpError::Decompression(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, DumpError::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_io_error_is_decompression() {
        let err = io::Error::new(io::ErrorKind::InvalidData, "invalid gzip header");
        let classified = DumpError::from_read(err);
        assert!(classified.is_decompression());
        assert!(!classified.is_network());
    }

    #[test]
    fn test_parse_error_display() {
        let err = DumpError::Parse {
            line: 3,
            reason: "expected 4 fields, found 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse Error at line 3: expected 4 fields, found 2"
        );
        assert!(err.is_parse());
    }
}
