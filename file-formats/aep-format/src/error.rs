//! Error types for AEP parsing and conversion.
//!
//! Parsing is fail-fast: the walk halts at the first malformed chunk instead
//! of silently reading a short payload. Version detection is the exception:
//! an unrecognized signature is an expected outcome and is surfaced through
//! `Option`/labels rather than an error, except where a conversion actually
//! requires a known version.

use thiserror::Error;

use crate::chunk::ChunkTag;

/// Type alias for Results from AEP operations.
pub type Result<T> = std::result::Result<T, AepError>;

/// Errors that can occur when working with AEP files.
#[derive(Debug, Error)]
pub enum AepError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first four bytes are neither `RIFF` nor `RIFX`.
    #[error("invalid container signature: expected RIFF or RIFX, found {found}")]
    InvalidContainerSignature {
        /// The four bytes actually present at the start of the buffer.
        found: ChunkTag,
    },

    /// The buffer is shorter than the minimum valid project file.
    #[error("file too small to be a valid project: {actual} bytes, minimum is {minimum}")]
    FileTooSmall {
        /// Actual buffer length in bytes.
        actual: usize,
        /// Minimum length required.
        minimum: usize,
    },

    /// A chunk declares more payload bytes than remain in the buffer.
    #[error(
        "truncated chunk {tag} at offset {offset}: declared {declared} bytes, {remaining} remaining"
    )]
    TruncatedChunk {
        /// Tag of the truncated chunk.
        tag: ChunkTag,
        /// Absolute offset of the chunk header.
        offset: usize,
        /// Payload length declared in the chunk header.
        declared: u32,
        /// Bytes actually remaining after the header.
        remaining: usize,
    },

    /// The version signature byte is outside the recognized range.
    #[error("unknown version signature byte 0x{byte:02x}")]
    UnknownVersion {
        /// The leading signature byte that failed to resolve.
        byte: u8,
    },

    /// The requested target version has no signature mapping.
    #[error("unsupported target version: {0}")]
    UnsupportedTarget(u32),

    /// Binary parsing library error.
    #[error("binrw error: {0}")]
    BinrwError(String),
}

impl From<binrw::Error> for AepError {
    fn from(err: binrw::Error) -> Self {
        AepError::BinrwError(format!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        let err = AepError::TruncatedChunk {
            tag: ChunkTag(*b"LIST"),
            offset: 12,
            declared: 500,
            remaining: 20,
        };
        let display = format!("{err}");
        assert!(display.contains("LIST"));
        assert!(display.contains("500"));
        assert!(display.contains("12"));

        let err = AepError::InvalidContainerSignature {
            found: ChunkTag(*b"ABCD"),
        };
        assert!(format!("{err}").contains("ABCD"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let aep_err: AepError = io_err.into();
        assert!(matches!(aep_err, AepError::Io(_)));
    }
}
