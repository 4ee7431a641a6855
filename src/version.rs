//! System Menu version classification.
//!
//! The System Menu TMD stores a raw title version (e.g. `514`) rather than
//! the number printed on the box (`4.3`). Each retail release was built once
//! per region, so one semantic version maps to several raw values:
//!
//! | Era | Raw values |
//! |-----|------------|
//! | 1.0 | 33 |
//! | 2.0 – 2.2 | 97, 128, 130 · 162 · 192 – 194 |
//! | 3.0 – 3.5 | 224 – 226 · 256 – 258 · 288 – 290 · 326, 352 – 354 · 384 – 386 · 390 |
//! | 4.0 – 4.3 | 416 – 418 · 448 – 450, 454 · 480 – 482, 486 · 512 – 514, 518, 544 – 546, 608 – 610 |
//!
//! Modified System Menu installs (mauifrog's 4.1 variants, raw `5444x`) carry
//! inflated version numbers so the update servers never offer them a
//! downgrade; they alias to 4.1.
//!
//! The region letter comes from an independent table, see [`crate::region`].

use std::fmt;

/// Human-facing `major.minor` System Menu version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SemanticVersion {
    pub major: u8,
    pub minor: u8,
}

impl SemanticVersion {
    /// Returned for raw versions missing from the table.
    pub const UNKNOWN: SemanticVersion = SemanticVersion::new(0, 0);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// True for [`SemanticVersion::UNKNOWN`].
    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    /// The version as a decimal, e.g. `4.3`.
    pub fn as_f32(self) -> f32 {
        self.major as f32 + self.minor as f32 / 10.0
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

const fn v(major: u8, minor: u8) -> SemanticVersion {
    SemanticVersion::new(major, minor)
}

/// Raw title version → semantic version, sorted by raw value.
static VERSIONS: [(u32, SemanticVersion); 50] = [
    (33, v(1, 0)),
    (97, v(2, 0)),
    (128, v(2, 0)),
    (130, v(2, 0)),
    (162, v(2, 1)),
    (192, v(2, 2)),
    (193, v(2, 2)),
    (194, v(2, 2)),
    (224, v(3, 0)),
    (225, v(3, 0)),
    (226, v(3, 0)),
    (256, v(3, 1)),
    (257, v(3, 1)),
    (258, v(3, 1)),
    (288, v(3, 2)),
    (289, v(3, 2)),
    (290, v(3, 2)),
    (326, v(3, 3)),
    (352, v(3, 3)),
    (353, v(3, 3)),
    (354, v(3, 3)),
    (384, v(3, 4)),
    (385, v(3, 4)),
    (386, v(3, 4)),
    (390, v(3, 5)),
    (416, v(4, 0)),
    (417, v(4, 0)),
    (418, v(4, 0)),
    (448, v(4, 1)),
    (449, v(4, 1)),
    (450, v(4, 1)),
    (454, v(4, 1)),
    (480, v(4, 2)),
    (481, v(4, 2)),
    (482, v(4, 2)),
    (486, v(4, 2)),
    (512, v(4, 3)),
    (513, v(4, 3)),
    (514, v(4, 3)),
    (518, v(4, 3)),
    (544, v(4, 3)),
    (545, v(4, 3)),
    (546, v(4, 3)),
    (608, v(4, 3)),
    (609, v(4, 3)),
    (610, v(4, 3)),
    // mauifrog 4.1 variants
    (54448, v(4, 1)),
    (54449, v(4, 1)),
    (54450, v(4, 1)),
    (54454, v(4, 1)),
];

/// Map a raw System Menu title version to its semantic version.
///
/// Unknown values yield [`SemanticVersion::UNKNOWN`]; this never fails.
pub fn classify_version(raw: u32) -> SemanticVersion {
    VERSIONS
        .binary_search_by_key(&raw, |&(r, _)| r)
        .map(|i| VERSIONS[i].1)
        .unwrap_or(SemanticVersion::UNKNOWN)
}
