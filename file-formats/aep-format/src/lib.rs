//! Parser and version-downgrade engine for After Effects project files.
//!
//! `.aep` projects are RIFX containers (big-endian RIFF) with the `Egg!`
//! form type. The application version that authored a project is encoded in
//! six bytes inside the head data region at fixed offsets, and newer
//! releases refuse nothing while older ones refuse to open newer projects.
//! This crate detects the authoring version from those bytes and rewrites
//! them in place to make a project readable by an older release, without
//! touching anything else in the file.
//!
//! # Overview
//!
//! - [`ChunkReader`] walks the container's chunk stream, for inspection and
//!   diagnostics.
//! - [`extract_signature`] pulls the six version bytes out of a buffer.
//! - [`AeVersion`] maps signatures to versions and back, preferring an exact
//!   table of confirmed signatures over the linear fallback rule.
//! - [`ConversionPlanner`] diffs two signatures into a minimal list of
//!   guarded byte edits, which [`apply_plan`] applies in place.
//! - [`convert`] ties those together behind a single call; [`detect_version`]
//!   is the read-only half.
//! - [`diff_chunks`] compares two files chunk by chunk, for studying how
//!   versions differ.
//!
//! # Example
//!
//! ```no_run
//! use aep_format::{convert, detect_version, NullSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut buffer = std::fs::read("project.aep")?;
//!
//! let (label, _) = detect_version(&buffer);
//! println!("detected: {label}");
//!
//! let result = convert(&mut buffer, 24, &mut NullSink)?;
//! println!("{}", result.message);
//!
//! std::fs::write("project_AE24x.aep", &buffer)?;
//! # Ok(())
//! # }
//! ```
//!
//! The engine operates on in-memory buffers and performs no file I/O of its
//! own. Conversions that change nothing (the file already has the target
//! signature) succeed with a modification count of zero.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chunk;
pub mod convert;
pub mod diff;
pub mod error;
pub mod patch;
pub mod planner;
pub mod signature;
pub mod version;

pub use chunk::{Chunk, ChunkHeader, ChunkReader, ChunkTag, ChunkWalker, ContainerHeader, read_chunks};
pub use convert::{ConversionResult, NullSink, ProgressSink, convert, detect_version};
pub use diff::{ChunkDiff, DiffReport, diff_chunks};
pub use error::{AepError, Result};
pub use patch::apply_plan;
pub use planner::{ConversionPlanner, HeadSignatureFamily, PatchFamily, TransformationEntry};
pub use signature::{
    HEAD_DATA_LEN, HEAD_DATA_OFFSET, MIN_PROJECT_LEN, SIGNATURE_POSITIONS, VersionSignature,
    extract_signature,
};
pub use version::{AeVersion, CONFIRMED_VERSIONS, downgrade_targets};
