//! Error types for the dat archive library.

use std::fmt;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when loading a dat archive.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A non-blank line did not split into the five `<>`-delimited fields
    MalformedRecord {
        /// 1-based physical line number in the archive text
        line: usize,
        /// Number of fields the line actually produced
        fields: usize,
    },

    /// Board or file name cannot address an archive
    InvalidLocation(String),

    /// Archive bytes are not valid Shift-JIS (strict decoding only)
    Decode(String),

    /// I/O error (when using runtime integrations)
    #[cfg(feature = "tokio-runtime")]
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRecord { line, fields } => {
                write!(f, "Malformed record on line {line}: expected 5 fields, found {fields}")
            }
            Error::InvalidLocation(msg) => write!(f, "Invalid archive location: {msg}"),
            Error::Decode(msg) => write!(f, "Decode error: {msg}"),
            #[cfg(feature = "tokio-runtime")]
            Error::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(feature = "tokio-runtime")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
