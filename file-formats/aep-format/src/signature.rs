//! Version signature extraction from the head-data region.
//!
//! The 20-byte head-data region at absolute offset 32 carries the bytes that
//! identify the authoring application version. Six positions within it are
//! distinguishing; they are read in a fixed order into a
//! [`VersionSignature`]. Extraction performs no range validation of the
//! byte values, that is the job of [`crate::version`].

use crate::error::{AepError, Result};

/// Absolute file offset of the head-data region.
pub const HEAD_DATA_OFFSET: usize = 32;

/// Length of the head-data region in bytes.
pub const HEAD_DATA_LEN: usize = 20;

/// Minimum length of a valid project file: enough to hold the container
/// header, the head chunk, and the full head-data region.
pub const MIN_PROJECT_LEN: usize = HEAD_DATA_OFFSET + HEAD_DATA_LEN;

/// Distinguishing byte positions, relative to the head-data region start.
pub const SIGNATURE_POSITIONS: [usize; 6] = [1, 3, 4, 5, 6, 7];

/// The ordered vector of six version-identifying bytes.
///
/// Two signatures are equal iff all six positions match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionSignature(pub [u8; 6]);

impl VersionSignature {
    /// Absolute file offset of signature position `index`.
    ///
    /// Internal: callers iterate the six positions, so `index` is always in
    /// `0..6`.
    pub(crate) const fn absolute_offset(index: usize) -> usize {
        HEAD_DATA_OFFSET + SIGNATURE_POSITIONS[index]
    }
}

impl std::fmt::Display for VersionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "0x{byte:02x}")?;
        }
        write!(f, "]")
    }
}

/// Read the six signature bytes from a complete file buffer.
///
/// Fails with [`AepError::FileTooSmall`] when the buffer is shorter than
/// [`MIN_PROJECT_LEN`] (52 bytes).
pub fn extract_signature(buf: &[u8]) -> Result<VersionSignature> {
    if buf.len() < MIN_PROJECT_LEN {
        return Err(AepError::FileTooSmall {
            actual: buf.len(),
            minimum: MIN_PROJECT_LEN,
        });
    }

    let mut sig = [0u8; 6];
    for (slot, rel) in sig.iter_mut().zip(SIGNATURE_POSITIONS) {
        *slot = buf[HEAD_DATA_OFFSET + rel];
    }
    Ok(VersionSignature(sig))
}
