//! Chunk-by-chunk comparison between two project files.
//!
//! Diagnostic tooling for studying how two revisions of a project differ at
//! the container level, typically a file saved by two application versions.
//! The patch path does not depend on this module.
//!
//! Partial results are acceptable here: each side's walk stops at the first
//! malformed chunk and the error is carried in the report instead of
//! aborting the comparison.

use crate::chunk::{Chunk, ChunkReader, ChunkTag};
use crate::error::{AepError, Result};

/// Maximum number of differing payload offsets recorded per chunk.
const MAX_RECORDED_OFFSETS: usize = 10;

/// One difference between same-index chunks of two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkDiff {
    /// The first file has a chunk at this index, the second does not.
    OnlyInFirst {
        /// Chunk index in file order.
        index: usize,
        /// Tag of the extra chunk.
        tag: ChunkTag,
    },

    /// The second file has a chunk at this index, the first does not.
    OnlyInSecond {
        /// Chunk index in file order.
        index: usize,
        /// Tag of the extra chunk.
        tag: ChunkTag,
    },

    /// The chunks at this index carry different tags.
    TagMismatch {
        /// Chunk index in file order.
        index: usize,
        /// Tag in the first file.
        first: ChunkTag,
        /// Tag in the second file.
        second: ChunkTag,
    },

    /// Same tag, different payload lengths.
    SizeMismatch {
        /// Chunk index in file order.
        index: usize,
        /// Common chunk tag.
        tag: ChunkTag,
        /// Payload length in the first file.
        first: usize,
        /// Payload length in the second file.
        second: usize,
    },

    /// Same tag and length, different payload bytes.
    ContentMismatch {
        /// Chunk index in file order.
        index: usize,
        /// Common chunk tag.
        tag: ChunkTag,
        /// First differing payload offsets, up to ten.
        offsets: Vec<usize>,
    },
}

impl std::fmt::Display for ChunkDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnlyInFirst { index, tag } => {
                write!(f, "chunk #{index} '{tag}' only in first file")
            }
            Self::OnlyInSecond { index, tag } => {
                write!(f, "chunk #{index} '{tag}' only in second file")
            }
            Self::TagMismatch {
                index,
                first,
                second,
            } => write!(f, "chunk #{index}: tags differ, '{first}' vs '{second}'"),
            Self::SizeMismatch {
                index,
                tag,
                first,
                second,
            } => write!(
                f,
                "chunk #{index} '{tag}': sizes differ, {first} vs {second} bytes"
            ),
            Self::ContentMismatch {
                index,
                tag,
                offsets,
            } => write!(
                f,
                "chunk #{index} '{tag}': same size, content differs at payload offsets {offsets:?}"
            ),
        }
    }
}

/// Result of comparing two files chunk by chunk.
#[derive(Debug)]
pub struct DiffReport {
    /// All recorded differences, in chunk order.
    pub differences: Vec<ChunkDiff>,

    /// Number of chunks walked in the first file.
    pub first_chunk_count: usize,

    /// Number of chunks walked in the second file.
    pub second_chunk_count: usize,

    /// Error that stopped the first file's walk early, if any.
    pub first_error: Option<AepError>,

    /// Error that stopped the second file's walk early, if any.
    pub second_error: Option<AepError>,
}

impl DiffReport {
    /// True when both walks completed and no differences were found.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty() && self.first_error.is_none() && self.second_error.is_none()
    }
}

fn collect_partial(buf: &[u8]) -> Result<(Vec<Chunk<'_>>, Option<AepError>)> {
    let reader = ChunkReader::new(buf)?;
    let mut chunks = Vec::new();
    for item in reader {
        match item {
            Ok(chunk) => chunks.push(chunk),
            Err(err) => return Ok((chunks, Some(err))),
        }
    }
    Ok((chunks, None))
}

fn differing_offsets(a: &[u8], b: &[u8]) -> Vec<usize> {
    a.iter()
        .zip(b)
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .take(MAX_RECORDED_OFFSETS)
        .collect()
}

/// Compare the top-level chunk sequences of two file buffers.
///
/// Fails only when a container header is invalid; per-chunk truncation is
/// carried in the report.
pub fn diff_chunks(first: &[u8], second: &[u8]) -> Result<DiffReport> {
    let (chunks_a, err_a) = collect_partial(first)?;
    let (chunks_b, err_b) = collect_partial(second)?;

    let mut differences = Vec::new();
    for index in 0..chunks_a.len().max(chunks_b.len()) {
        match (chunks_a.get(index), chunks_b.get(index)) {
            (Some(a), None) => differences.push(ChunkDiff::OnlyInFirst { index, tag: a.tag }),
            (None, Some(b)) => differences.push(ChunkDiff::OnlyInSecond { index, tag: b.tag }),
            (Some(a), Some(b)) if a.tag != b.tag => differences.push(ChunkDiff::TagMismatch {
                index,
                first: a.tag,
                second: b.tag,
            }),
            (Some(a), Some(b)) if a.data.len() != b.data.len() => {
                differences.push(ChunkDiff::SizeMismatch {
                    index,
                    tag: a.tag,
                    first: a.data.len(),
                    second: b.data.len(),
                });
            }
            (Some(a), Some(b)) if a.data != b.data => {
                differences.push(ChunkDiff::ContentMismatch {
                    index,
                    tag: a.tag,
                    offsets: differing_offsets(a.data, b.data),
                });
            }
            _ => {}
        }
    }

    Ok(DiffReport {
        differences,
        first_chunk_count: chunks_a.len(),
        second_chunk_count: chunks_b.len(),
        first_error: err_a,
        second_error: err_b,
    })
}
