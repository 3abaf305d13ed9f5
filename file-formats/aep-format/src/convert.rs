//! High-level detection and conversion entry points.
//!
//! These are the operations a frontend calls: it supplies a complete
//! in-memory buffer, receives progress strings through an explicitly passed
//! [`ProgressSink`], and gets back either a typed error or a
//! [`ConversionResult`] with the modification count. The engine mutates the
//! buffer in place and performs no file I/O; reading and writing the file is
//! the caller's job. Each call is independent and shares no state, so
//! callers may run many conversions concurrently on separate buffers.

use crate::error::{AepError, Result};
use crate::patch::apply_plan;
use crate::planner::ConversionPlanner;
use crate::signature::{MIN_PROJECT_LEN, extract_signature};
use crate::version::AeVersion;

/// Receiver for human-readable progress messages.
///
/// Passed explicitly instead of going through a process-wide logger so the
/// engine stays testable without a live logging subsystem.
pub trait ProgressSink {
    /// Called once per progress message, in order.
    fn progress(&mut self, message: &str);
}

/// Sink that discards all progress messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn progress(&mut self, _message: &str) {}
}

/// Collecting sink, mostly useful in tests and batch frontends.
impl ProgressSink for Vec<String> {
    fn progress(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Outcome of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Number of byte edits actually applied.
    pub modifications: u32,

    /// Whether the conversion completed.
    pub success: bool,

    /// Human-readable summary for the frontend.
    pub message: String,
}

/// Detect the authoring version of a project file.
///
/// Returns a display label and the major version number, or zero when the
/// version cannot be determined. Never fails: an undetectable version is an
/// expected outcome, reported through the label.
#[must_use]
pub fn detect_version(buffer: &[u8]) -> (String, u32) {
    if buffer.len() < MIN_PROJECT_LEN {
        return ("Unknown (file too small)".to_string(), 0);
    }

    // Length was checked above, extraction cannot fail.
    let Ok(sig) = extract_signature(buffer) else {
        return ("Unknown (file too small)".to_string(), 0);
    };

    match AeVersion::from_signature(&sig) {
        Some(version) => (format!("{version} (detected)"), version.as_u32()),
        None => ("Unknown version".to_string(), 0),
    }
}

/// Convert a project buffer to `target` in place.
///
/// Reads the current signature, plans the byte edits for the transition,
/// applies them, and reports the applied count. Fails with
/// [`AepError::FileTooSmall`] for undersized buffers,
/// [`AepError::UnknownVersion`] when the current signature is outside the
/// recognized range (no transformation is attempted), and
/// [`AepError::UnsupportedTarget`] when `target` has no signature mapping.
///
/// Converting to AE 22.x emits a compatibility warning through the sink but
/// proceeds unconditionally: the head signature is rewritten even though
/// structural differences may remain.
pub fn convert(
    buffer: &mut [u8],
    target: u32,
    sink: &mut dyn ProgressSink,
) -> Result<ConversionResult> {
    let target_version = AeVersion::new(target).ok_or(AepError::UnsupportedTarget(target))?;
    sink.progress(&format!("Starting conversion to {target_version}..."));

    sink.progress("Analyzing file headers...");
    let current = extract_signature(buffer)?;
    sink.progress(&format!("File signature: {current}"));

    let current_version = AeVersion::from_signature(&current).ok_or(AepError::UnknownVersion {
        byte: current.0[0],
    })?;
    sink.progress(&format!("Detected {current_version}"));

    let target_sig = target_version.to_signature();
    sink.progress(&format!("Target signature: {target_sig}"));

    let plan = ConversionPlanner::new().plan(&current, target)?;
    let modifications = apply_plan(buffer, &plan);

    if target_version.as_u32() == 22 {
        sink.progress(
            "WARNING: Converting to AE 22.x may result in compatibility issues \
             due to structural differences.",
        );
        sink.progress("Consider using AE 23.x as target for better compatibility.");
    }

    sink.progress(&format!("Applied {modifications} modification(s)"));

    Ok(ConversionResult {
        modifications,
        success: true,
        message: format!(
            "Converted {current_version} project to {target_version} \
             with {modifications} modification(s)"
        ),
    })
}
