//! In-place application of a transformation plan.

use crate::planner::TransformationEntry;

/// Apply a plan to a buffer in place and return the number of edits applied.
///
/// Each edit is guarded: the byte at the entry's offset must still equal the
/// expected value, otherwise the entry is skipped without touching the
/// buffer and without affecting other entries. The guard keeps the patch
/// bounded to exactly the bytes known to encode version identity, so a
/// buffer that was mutated between scan and patch, or that never had the
/// assumed signature, is not corrupted further. A returned count of zero is
/// a valid outcome; the caller decides whether to treat it as a warning.
pub fn apply_plan(buffer: &mut [u8], plan: &[TransformationEntry]) -> u32 {
    let mut applied = 0;
    for entry in plan {
        match buffer.get_mut(entry.offset) {
            Some(byte) if *byte == entry.expected => {
                *byte = entry.replacement;
                applied += 1;
            }
            Some(byte) => {
                log::debug!(
                    "skipping edit at offset {}: expected 0x{:02x}, found 0x{:02x}",
                    entry.offset,
                    entry.expected,
                    byte
                );
            }
            None => {
                log::debug!(
                    "skipping edit at offset {}: past end of {}-byte buffer",
                    entry.offset,
                    buffer.len()
                );
            }
        }
    }
    applied
}
