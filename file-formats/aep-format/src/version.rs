//! Version numbers and their byte signatures.
//!
//! Two layers map between signatures and versions:
//!
//! 1. An exact lookup table of confirmed signatures, derived from byte-level
//!    analysis of real project files. Adding a newly confirmed version is a
//!    data change here, not a logic change.
//! 2. A fallback rule for versions without a confirmed row: the leading
//!    signature byte follows the linear law `sig[0] = 0x5b + (version - 20)`
//!    for every known version, and the remaining tail bytes are taken from
//!    the nearest confirmed row (the 22 row below the table, the 26 row
//!    above it).
//!
//! The table values must be reproduced exactly; no linear law was found for
//! the tail positions. The one exception is head position 4 (signature
//! position 2), which is 0x0b below version 24 and 0x0f from 24 on; it is
//! kept in the table anyway so the table stays the single source of truth.

use crate::signature::VersionSignature;

/// Versions with a fully confirmed signature row, and therefore the only
/// versions offered as downgrade targets.
pub const CONFIRMED_VERSIONS: [u32; 5] = [22, 23, 24, 25, 26];

/// Confirmed tail bytes (head-data positions 3..=7) per version.
const SIGNATURE_TAILS: [(u32, [u8; 5]); 5] = [
    (22, [0x2b, 0x0b, 0x33, 0x06, 0x3b]),
    (23, [0x09, 0x0b, 0x3b, 0x06, 0x37]),
    (24, [0x05, 0x0f, 0x02, 0x86, 0x34]),
    (25, [0x09, 0x0f, 0x0b, 0x06, 0x65]),
    (26, [0x02, 0x0f, 0x10, 0x06, 0x43]),
];

/// Tail bytes for a version, confirmed row or fallback.
fn signature_tail(version: u32) -> [u8; 5] {
    if let Some((_, tail)) = SIGNATURE_TAILS.iter().find(|(v, _)| *v == version) {
        return *tail;
    }
    if version < 22 {
        SIGNATURE_TAILS[0].1
    } else {
        // Unconfirmed newer versions keep the newest confirmed pattern.
        SIGNATURE_TAILS[SIGNATURE_TAILS.len() - 1].1
    }
}

/// A major After Effects version, in the recognized range 22–33.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AeVersion(u32);

impl AeVersion {
    /// Lowest recognized major version (leading signature byte 0x5d).
    pub const MIN: u32 = 22;

    /// Highest recognized major version, the top of the accepted
    /// signature-byte window `[0x5d, 0x6a]`. Versions above 26 have no
    /// confirmed signature and use the fallback tail.
    pub const MAX: u32 = 35;

    /// Base of the linear rule: `sig[0] = BASE_BYTE + (version - 20)`.
    const BASE_BYTE: u8 = 0x5b;

    /// Wrap a raw version number, or `None` outside the recognized range.
    #[must_use]
    pub fn new(version: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&version).then_some(Self(version))
    }

    /// The raw major version number.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The leading signature byte for this version, per the linear rule.
    #[must_use]
    pub const fn signature_byte(self) -> u8 {
        Self::BASE_BYTE + (self.0 - 20) as u8
    }

    /// Resolve a version from the leading signature byte alone.
    ///
    /// `None` for bytes outside `[0x5d, 0x6a]`; an unknown version is an
    /// expected outcome, not a fault.
    #[must_use]
    pub fn from_signature_byte(byte: u8) -> Option<Self> {
        const LOW: u8 = AeVersion::BASE_BYTE + (AeVersion::MIN - 20) as u8;
        const HIGH: u8 = AeVersion::BASE_BYTE + (AeVersion::MAX - 20) as u8;
        (LOW..=HIGH)
            .contains(&byte)
            .then(|| Self(u32::from(byte - Self::BASE_BYTE) + 20))
    }

    /// Resolve a version from a full signature.
    ///
    /// A confirmed exact-match row is preferred for round-trip accuracy; the
    /// linear rule on the leading byte is the fallback.
    #[must_use]
    pub fn from_signature(sig: &VersionSignature) -> Option<Self> {
        for (version, tail) in &SIGNATURE_TAILS {
            let confirmed = Self(*version);
            if sig.0[0] == confirmed.signature_byte() && sig.0[1..] == tail[..] {
                return Some(confirmed);
            }
        }
        Self::from_signature_byte(sig.0[0])
    }

    /// The full signature for this version: linear leading byte plus the
    /// table (or fallback) tail.
    #[must_use]
    pub fn to_signature(self) -> VersionSignature {
        let mut sig = [0u8; 6];
        sig[0] = self.signature_byte();
        sig[1..].copy_from_slice(&signature_tail(self.0));
        VersionSignature(sig)
    }
}

impl std::fmt::Display for AeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AE {}.x", self.0)
    }
}

/// Downgrade targets offerable for a detected version: the confirmed
/// versions strictly below it.
#[must_use]
pub fn downgrade_targets(detected: u32) -> Vec<AeVersion> {
    CONFIRMED_VERSIONS
        .iter()
        .filter(|&&v| v < detected)
        .map(|&v| AeVersion(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn linear_rule_maps_leading_byte() {
        assert_eq!(AeVersion::new(22).unwrap().signature_byte(), 0x5d);
        assert_eq!(AeVersion::new(24).unwrap().signature_byte(), 0x5f);
        assert_eq!(AeVersion::new(33).unwrap().signature_byte(), 0x68);

        assert_eq!(AeVersion::from_signature_byte(0x5d).unwrap().as_u32(), 22);
        assert_eq!(AeVersion::from_signature_byte(0x6a).unwrap().as_u32(), 35);
    }

    #[test]
    fn bytes_outside_range_are_unknown() {
        assert!(AeVersion::from_signature_byte(0x5c).is_none());
        assert!(AeVersion::from_signature_byte(0x6b).is_none());
        assert!(AeVersion::from_signature_byte(0x00).is_none());
    }

    #[test]
    fn version_range_is_enforced() {
        assert!(AeVersion::new(21).is_none());
        assert!(AeVersion::new(36).is_none());
        assert!(AeVersion::new(22).is_some());
        assert!(AeVersion::new(35).is_some());
    }

    #[test]
    fn confirmed_signatures_round_trip() {
        for version in CONFIRMED_VERSIONS {
            let v = AeVersion::new(version).unwrap();
            assert_eq!(AeVersion::from_signature(&v.to_signature()), Some(v));
        }
    }

    #[test]
    fn table_rows_match_empirical_values() {
        assert_eq!(
            AeVersion::new(22).unwrap().to_signature(),
            VersionSignature([0x5d, 0x2b, 0x0b, 0x33, 0x06, 0x3b])
        );
        assert_eq!(
            AeVersion::new(24).unwrap().to_signature(),
            VersionSignature([0x5f, 0x05, 0x0f, 0x02, 0x86, 0x34])
        );
        assert_eq!(
            AeVersion::new(25).unwrap().to_signature(),
            VersionSignature([0x60, 0x09, 0x0f, 0x0b, 0x06, 0x65])
        );
    }

    #[test]
    fn unconfirmed_versions_use_newest_tail() {
        let sig = AeVersion::new(27).unwrap().to_signature();
        assert_eq!(sig, VersionSignature([0x62, 0x02, 0x0f, 0x10, 0x06, 0x43]));

        let sig = AeVersion::new(33).unwrap().to_signature();
        assert_eq!(sig.0[1..], [0x02, 0x0f, 0x10, 0x06, 0x43]);
    }

    #[test]
    fn non_confirmed_signature_falls_back_to_linear_rule() {
        // Leading byte says 25, tail bytes match no confirmed row.
        let sig = VersionSignature([0x60, 0x01, 0x0f, 0x08, 0x86, 0x44]);
        assert_eq!(AeVersion::from_signature(&sig).unwrap().as_u32(), 25);
    }

    #[test]
    fn downgrade_targets_are_confirmed_versions_below_detected() {
        let targets: Vec<u32> = downgrade_targets(25).iter().map(|v| v.as_u32()).collect();
        assert_eq!(targets, vec![22, 23, 24]);

        assert!(downgrade_targets(22).is_empty());
        assert!(downgrade_targets(0).is_empty());

        let targets: Vec<u32> = downgrade_targets(33).iter().map(|v| v.as_u32()).collect();
        assert_eq!(targets, vec![22, 23, 24, 25, 26]);
    }

    #[test]
    fn display_formats_major_version() {
        assert_eq!(AeVersion::new(24).unwrap().to_string(), "AE 24.x");
    }
}
