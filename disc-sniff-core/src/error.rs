use thiserror::Error;

const EIO: i32 = 5;
const EINVAL: i32 = 22;

/// Errors that can occur while sniffing a disc image or CUE sheet.
///
/// I/O failures are kept apart from format failures so callers can tell
/// "image unreadable" from "image not recognized".
#[derive(Debug, Error)]
pub enum DiscError {
    /// I/O error while opening, seeking or reading the stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No magic signature matched the image
    #[error("System not recognized")]
    NotRecognized,

    /// A CUE sheet was read to the end without finding a data track
    #[error("No data track found")]
    NoDataTrack,

    /// An expected structure (directory entry, keyword, serial) is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content is present but malformed
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Config(String),
}

impl DiscError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for I/O failures, false for "didn't match" style failures.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Negative errno-style code for callers that speak the C convention.
    ///
    /// I/O errors map to the negated OS error code (`-EIO` when the error
    /// carries none); every format error maps to `-EINVAL`.
    pub fn errno(&self) -> i32 {
        match self {
            Self::Io(e) => -e.raw_os_error().unwrap_or(EIO),
            _ => -EINVAL,
        }
    }
}
