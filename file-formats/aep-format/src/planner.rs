//! Conversion planning: diffing version signatures into byte-level edits.
//!
//! A plan is an ordered list of guarded single-byte edits. Only positions
//! where the current and target signatures differ are emitted, so re-running
//! a plan against an already-converted file yields nothing to do, and every
//! entry carries the byte it expects to replace so the applier can refuse to
//! touch a buffer that no longer matches.
//!
//! Byte rules are grouped into [`PatchFamily`] implementations, each owning
//! a self-contained set of fixed offsets. The head-data signature is the
//! only family shipped today; deeper structural regions that also vary by
//! version (secondary headers near offsets 60 and 100 have been observed)
//! would register as additional families with their own per-transition
//! tables, without touching the existing ones.

use crate::error::{AepError, Result};
use crate::signature::VersionSignature;
use crate::version::AeVersion;

/// A single guarded byte edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformationEntry {
    /// Absolute file offset of the byte to rewrite.
    pub offset: usize,

    /// The byte expected at `offset`; the edit is skipped when it differs.
    pub expected: u8,

    /// The byte to write.
    pub replacement: u8,
}

/// A self-contained set of fixed-offset byte rules for version transitions.
pub trait PatchFamily {
    /// Short name for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// The edits this family contributes for converting a file with the
    /// given current signature to the target version.
    fn entries(&self, current: &VersionSignature, target: AeVersion) -> Vec<TransformationEntry>;
}

/// The head-data signature family: the six fixed positions at absolute
/// offsets 33, 35, 36, 37, 38, 39.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadSignatureFamily;

impl PatchFamily for HeadSignatureFamily {
    fn name(&self) -> &'static str {
        "head-signature"
    }

    fn entries(&self, current: &VersionSignature, target: AeVersion) -> Vec<TransformationEntry> {
        let target_sig = target.to_signature();
        let mut entries = Vec::new();
        for (i, (&cur, &new)) in current.0.iter().zip(&target_sig.0).enumerate() {
            if cur != new {
                entries.push(TransformationEntry {
                    offset: VersionSignature::absolute_offset(i),
                    expected: cur,
                    replacement: new,
                });
            }
        }
        entries
    }
}

/// Computes conversion plans from a registered list of patch families.
pub struct ConversionPlanner {
    families: Vec<Box<dyn PatchFamily>>,
}

impl ConversionPlanner {
    /// Planner with the default family set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            families: vec![Box::new(HeadSignatureFamily)],
        }
    }

    /// Register an additional patch family. Families contribute entries in
    /// registration order.
    pub fn register(&mut self, family: Box<dyn PatchFamily>) {
        self.families.push(family);
    }

    /// Compute the ordered edit list for converting a file with the given
    /// current signature to `target`.
    ///
    /// Fails with [`AepError::UnsupportedTarget`] when `target` has no
    /// signature mapping.
    pub fn plan(
        &self,
        current: &VersionSignature,
        target: u32,
    ) -> Result<Vec<TransformationEntry>> {
        let target = AeVersion::new(target).ok_or(AepError::UnsupportedTarget(target))?;

        let mut entries = Vec::new();
        for family in &self.families {
            let contributed = family.entries(current, target);
            log::debug!(
                "family {} contributed {} edit(s) for {target}",
                family.name(),
                contributed.len()
            );
            entries.extend(contributed);
        }
        Ok(entries)
    }
}

impl Default for ConversionPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConversionPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionPlanner")
            .field(
                "families",
                &self.families.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plan_emits_only_differing_positions() {
        // Version 25 as detected in the wild, not the confirmed 25 row.
        let current = VersionSignature([0x60, 0x01, 0x0f, 0x08, 0x86, 0x44]);
        let plan = ConversionPlanner::new()
            .plan(&current, 24)
            .expect("plan to 24");

        // Target 24 is [0x5f, 0x05, 0x0f, 0x02, 0x86, 0x34]: positions
        // 2 and 4 already match.
        assert_eq!(
            plan,
            vec![
                TransformationEntry {
                    offset: 33,
                    expected: 0x60,
                    replacement: 0x5f,
                },
                TransformationEntry {
                    offset: 35,
                    expected: 0x01,
                    replacement: 0x05,
                },
                TransformationEntry {
                    offset: 37,
                    expected: 0x08,
                    replacement: 0x02,
                },
                TransformationEntry {
                    offset: 39,
                    expected: 0x44,
                    replacement: 0x34,
                },
            ]
        );
    }

    #[test]
    fn plan_for_matching_signature_is_empty() {
        let current = AeVersion::new(24).unwrap().to_signature();
        let plan = ConversionPlanner::new()
            .plan(&current, 24)
            .expect("plan to 24");
        assert!(plan.is_empty());
    }

    #[test]
    fn plan_entry_count_equals_differing_positions() {
        let current = AeVersion::new(25).unwrap().to_signature();
        let target = AeVersion::new(23).unwrap().to_signature();
        let differing = current
            .0
            .iter()
            .zip(&target.0)
            .filter(|(a, b)| a != b)
            .count();

        let plan = ConversionPlanner::new()
            .plan(&current, 23)
            .expect("plan to 23");
        assert_eq!(plan.len(), differing);
    }

    #[test]
    fn unsupported_target_is_rejected() {
        let current = AeVersion::new(25).unwrap().to_signature();
        let err = ConversionPlanner::new()
            .plan(&current, 99)
            .expect_err("unsupported");
        assert!(matches!(err, AepError::UnsupportedTarget(99)));
    }

    #[test]
    fn registered_families_contribute_in_order() {
        struct TrailerFamily;

        impl PatchFamily for TrailerFamily {
            fn name(&self) -> &'static str {
                "trailer"
            }

            fn entries(
                &self,
                _current: &VersionSignature,
                _target: AeVersion,
            ) -> Vec<TransformationEntry> {
                vec![TransformationEntry {
                    offset: 60,
                    expected: 0x00,
                    replacement: 0x01,
                }]
            }
        }

        let mut planner = ConversionPlanner::new();
        planner.register(Box::new(TrailerFamily));

        let current = VersionSignature([0x60, 0x01, 0x0f, 0x08, 0x86, 0x44]);
        let plan = planner.plan(&current, 24).expect("plan");
        assert_eq!(plan.last().unwrap().offset, 60);
        assert_eq!(plan.len(), 5);
    }
}
