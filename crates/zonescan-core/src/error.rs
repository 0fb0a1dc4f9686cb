//! zonescan error types

use thiserror::Error;

/// Hard failures that abort a zone table analysis.
///
/// Anything the decoder can describe as data (a truncated GPT entry array, a bad
/// inner GPT signature) is reported as an advisory record instead of an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading the image source
    #[error("Pipeline I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source holds fewer bytes than the structure being decoded
    #[error("Data too small to contain MBR: need {needed} bytes, got {available}")]
    TooSmall { needed: u64, available: u64 },

    /// Boot sector signature at offset 0x1FE is not 0xAA55
    #[error("Invalid MBR signature: expected 0xAA55, got 0x{found:04X}")]
    InvalidBootSignature { found: u16 },

    /// Arithmetic on header fields left the addressable range
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Invalid path or file name
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// File not found or inaccessible
    #[error("Not found: {0}")]
    NotFound(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Result type alias for zonescan operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an arithmetic overflow error
    pub fn overflow(msg: impl Into<String>) -> Self {
        Error::Overflow(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Error::InvalidPath(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Error::PermissionDenied(msg.into())
    }
}
