//! RIFF/RIFX container and chunk structures.
//!
//! AEP files are RIFX containers: a 12-byte container header followed by a
//! flat sequence of chunks. Every chunk is a 4-byte ASCII tag, a 4-byte
//! big-endian payload length, the payload itself, and one padding byte when
//! the length is odd. `LIST` chunks carry a 4-byte form type followed by
//! nested chunks in the same layout.
//!
//! # Binary Layout
//!
//! ```text
//! Offset | Size | Field         | Description
//! -------|------|---------------|----------------------------------------
//! 0x00   |  4   | signature     | "RIFF" or "RIFX" ASCII
//! 0x04   |  4   | declared_size | Total size, big-endian (diagnostic only)
//! 0x08   |  4   | format_tag    | Form type ("Egg!" for AEP)
//! 0x0C   |  ... | chunks        | Tag + big-endian length + payload [+ pad]
//! ```
//!
//! The declared size is not used to bound the walk; the walk continues until
//! fewer than 8 bytes remain in the buffer. A chunk whose declared length
//! exceeds the remaining buffer is a malformed-file condition and fails with
//! [`AepError::TruncatedChunk`] rather than silently reading short.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};

use crate::error::{AepError, Result};

/// 4-byte chunk tag (magic bytes).
///
/// RIFF tags are stored in reading order, so the bytes in the file are the
/// ASCII characters of the documented name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BinRead, BinWrite)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    /// Little-endian RIFF container signature.
    pub const RIFF: Self = Self(*b"RIFF");

    /// Big-endian RIFF container signature, used by AEP files.
    pub const RIFX: Self = Self(*b"RIFX");

    /// List chunk containing a form type and nested chunks.
    pub const LIST: Self = Self(*b"LIST");

    /// Form type of AEP containers.
    pub const EGG: Self = Self(*b"Egg!");

    /// Convert to a human-readable string, with non-ASCII bytes escaped.
    #[must_use]
    pub fn as_str(&self) -> String {
        String::from_utf8_lossy(&self.0).to_string()
    }
}

impl std::fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// RIFF/RIFX container header (first 12 bytes of the file).
#[derive(Debug, Clone, Copy, BinRead, BinWrite)]
#[brw(big)]
pub struct ContainerHeader {
    /// Container signature, must be `RIFF` or `RIFX`.
    pub signature: ChunkTag,

    /// Declared total size in bytes, big-endian.
    ///
    /// Diagnostic only: real files are occasionally written with a stale
    /// value here, so the chunk walk is bounded by the buffer instead.
    pub declared_size: u32,

    /// Form type of the container (`Egg!` for AEP).
    pub format_tag: ChunkTag,
}

impl ContainerHeader {
    /// Size of the container header in bytes.
    pub const SIZE: usize = 12;

    /// Check whether the signature is one of the two recognized values.
    #[must_use]
    pub fn has_valid_signature(&self) -> bool {
        self.signature == ChunkTag::RIFF || self.signature == ChunkTag::RIFX
    }
}

/// Standard chunk header (8 bytes): tag + big-endian payload length.
#[derive(Debug, Clone, Copy, BinRead, BinWrite)]
#[brw(big)]
pub struct ChunkHeader {
    /// Chunk tag.
    pub tag: ChunkTag,

    /// Payload length in bytes, excluding the header and any padding byte.
    pub length: u32,
}

impl ChunkHeader {
    /// Size of the chunk header in bytes.
    pub const SIZE: usize = 8;

    /// Total bytes this chunk occupies: header, payload, and padding byte
    /// when the payload length is odd.
    #[must_use]
    pub const fn total_size(&self) -> u64 {
        Self::SIZE as u64 + self.length as u64 + (self.length % 2) as u64
    }
}

/// A chunk borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Chunk tag.
    pub tag: ChunkTag,

    /// Absolute offset of the chunk header within the file buffer.
    pub offset: usize,

    /// Payload bytes.
    pub data: &'a [u8],

    /// True when the payload length is odd and a padding byte follows.
    pub padded: bool,
}

impl<'a> Chunk<'a> {
    /// Walk the chunks nested inside a `LIST` chunk.
    ///
    /// Returns the list's form type and a walker over its children, or
    /// `None` when this chunk is not a `LIST` or its payload is too short to
    /// carry a form type.
    #[must_use]
    pub fn children(&self) -> Option<(ChunkTag, ChunkWalker<'a>)> {
        if self.tag != ChunkTag::LIST || self.data.len() < 4 {
            return None;
        }
        let form = ChunkTag([self.data[0], self.data[1], self.data[2], self.data[3]]);
        let base = self.offset + ChunkHeader::SIZE + 4;
        Some((form, ChunkWalker::new(&self.data[4..], base)))
    }
}

/// Walker over a raw chunk sequence, without a container header.
///
/// Yields chunks in file order. Stops cleanly when fewer than 8 bytes remain
/// (a trailing padding byte at end-of-buffer is normal), and fails with
/// [`AepError::TruncatedChunk`] when a declared length exceeds the remaining
/// buffer. After an error the walker yields nothing further.
#[derive(Debug, Clone)]
pub struct ChunkWalker<'a> {
    buf: &'a [u8],
    base: usize,
    pos: usize,
    failed: bool,
}

impl<'a> ChunkWalker<'a> {
    /// Create a walker over `buf`, where `buf[0]` sits at absolute file
    /// offset `base` (used for offset reporting).
    #[must_use]
    pub fn new(buf: &'a [u8], base: usize) -> Self {
        Self {
            buf,
            base,
            pos: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for ChunkWalker<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buf.len() - self.pos < ChunkHeader::SIZE {
            return None;
        }

        let offset = self.base + self.pos;
        let mut cursor = Cursor::new(&self.buf[self.pos..]);
        let header = match ChunkHeader::read(&mut cursor) {
            Ok(header) => header,
            Err(err) => {
                self.failed = true;
                return Some(Err(err.into()));
            }
        };

        let data_start = self.pos + ChunkHeader::SIZE;
        let remaining = self.buf.len() - data_start;
        let length = header.length as usize;
        if length > remaining {
            self.failed = true;
            return Some(Err(AepError::TruncatedChunk {
                tag: header.tag,
                offset,
                declared: header.length,
                remaining,
            }));
        }

        let padded = header.length % 2 == 1;
        // The padding byte may coincide with end-of-buffer.
        self.pos = (data_start + length + usize::from(padded)).min(self.buf.len());

        Some(Ok(Chunk {
            tag: header.tag,
            offset,
            data: &self.buf[data_start..data_start + length],
            padded,
        }))
    }
}

/// Reader for the top-level chunk sequence of a project file.
///
/// Validates the container header on construction, then yields the top-level
/// chunks. Re-invocable: constructing a new reader over the same buffer
/// restarts the walk.
///
/// ```
/// use aep_format::chunk::ChunkReader;
///
/// let mut buf = Vec::new();
/// buf.extend_from_slice(b"RIFX");
/// buf.extend_from_slice(&12u32.to_be_bytes());
/// buf.extend_from_slice(b"Egg!");
/// buf.extend_from_slice(b"fake");
/// buf.extend_from_slice(&4u32.to_be_bytes());
/// buf.extend_from_slice(&[1, 2, 3, 4]);
///
/// let reader = ChunkReader::new(&buf).unwrap();
/// let chunks: Vec<_> = reader.map(Result::unwrap).collect();
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].tag.as_str(), "fake");
/// ```
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    container: ContainerHeader,
    walker: ChunkWalker<'a>,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader over a complete file buffer.
    ///
    /// Fails with [`AepError::FileTooSmall`] when the buffer cannot hold a
    /// container header, and [`AepError::InvalidContainerSignature`] when the
    /// first four bytes are neither `RIFF` nor `RIFX`.
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        if buf.len() < ContainerHeader::SIZE {
            return Err(AepError::FileTooSmall {
                actual: buf.len(),
                minimum: ContainerHeader::SIZE,
            });
        }

        let mut cursor = Cursor::new(buf);
        let container = ContainerHeader::read(&mut cursor)?;
        if !container.has_valid_signature() {
            return Err(AepError::InvalidContainerSignature {
                found: container.signature,
            });
        }

        log::debug!(
            "container: {} form {}, declared size {}",
            container.signature,
            container.format_tag,
            container.declared_size
        );

        Ok(Self {
            container,
            walker: ChunkWalker::new(&buf[ContainerHeader::SIZE..], ContainerHeader::SIZE),
        })
    }

    /// The validated container header.
    #[must_use]
    pub fn container(&self) -> &ContainerHeader {
        &self.container
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walker.next()
    }
}

/// Collect all top-level chunks of a project file, failing on the first
/// malformed chunk.
pub fn read_chunks(buf: &[u8]) -> Result<Vec<Chunk<'_>>> {
    ChunkReader::new(buf)?.collect()
}
