//! Every known System Menu build, checked against both lookup tables.
//!
//! The list below is written out by release rather than derived from the
//! tables, so a wrong or missing table entry shows up as a mismatch.

use sysmenu::region::{RegionCode, classify_region};
use sysmenu::version::{SemanticVersion, classify_version};

use RegionCode::{E, J, K, U, X};

/// `(major, minor, builds)`, where each build is `(raw, region)`.
const RELEASES: &[(u8, u8, &[(u32, RegionCode)])] = &[
    (1, 0, &[(33, X)]),
    (2, 0, &[(97, U), (128, J), (130, E)]),
    (2, 1, &[(162, E)]),
    (2, 2, &[(192, J), (193, U), (194, E)]),
    (3, 0, &[(224, J), (225, U), (226, E)]),
    (3, 1, &[(256, J), (257, U), (258, E)]),
    (3, 2, &[(288, J), (289, U), (290, E)]),
    (3, 3, &[(326, K), (352, J), (353, U), (354, E)]),
    (3, 4, &[(384, J), (385, U), (386, E)]),
    (3, 5, &[(390, K)]),
    (4, 0, &[(416, J), (417, U), (418, E)]),
    (
        4,
        1,
        &[
            (448, J),
            (449, U),
            (450, E),
            (454, K),
            (54448, J),
            (54449, U),
            (54450, E),
            (54454, K),
        ],
    ),
    (4, 2, &[(480, J), (481, U), (482, E), (486, K)]),
    (
        4,
        3,
        &[
            (512, J),
            (513, U),
            (514, E),
            (518, K),
            (544, J),
            (545, U),
            (546, E),
            (608, J),
            (609, U),
            (610, E),
        ],
    ),
];

/// Region entries with no retail version: the pre-launch build.
const REGION_ONLY: &[(u32, RegionCode)] = &[(1, U)];

fn builds() -> impl Iterator<Item = (u32, SemanticVersion, RegionCode)> {
    RELEASES.iter().flat_map(|&(major, minor, builds)| {
        builds
            .iter()
            .map(move |&(raw, region)| (raw, SemanticVersion::new(major, minor), region))
    })
}

#[test]
fn every_build_has_its_version() {
    for (raw, version, _) in builds() {
        assert_eq!(classify_version(raw), version, "raw {raw}");
    }
}

#[test]
fn every_build_has_its_region() {
    for (raw, _, region) in builds() {
        assert_eq!(classify_region(raw), region, "raw {raw}");
    }
    for &(raw, region) in REGION_ONLY {
        assert_eq!(classify_region(raw), region, "raw {raw}");
        assert!(classify_version(raw).is_unknown(), "raw {raw}");
    }
}

#[test]
fn releases_have_their_regional_builds() {
    for &(major, minor, builds) in RELEASES {
        let expected: String = builds.iter().map(|&(_, r)| r.as_char()).collect();
        let got: String = builds
            .iter()
            .map(|&(raw, _)| {
                assert_eq!(classify_version(raw), SemanticVersion::new(major, minor));
                classify_region(raw).as_char()
            })
            .collect();
        assert_eq!(got, expected, "{major}.{minor}");
    }
}

#[test]
fn tables_hold_nothing_else() {
    // Every raw value a TMD title version can hold.
    let versions = (0..=u32::from(u16::MAX))
        .filter(|&raw| !classify_version(raw).is_unknown())
        .count();
    let regions = (0..=u32::from(u16::MAX))
        .filter(|&raw| !classify_region(raw).is_unknown())
        .count();

    assert_eq!(versions, builds().count());
    assert_eq!(versions, 50);
    assert_eq!(
        regions,
        builds().filter(|&(_, _, r)| r != X).count() + REGION_ONLY.len()
    );
    assert_eq!(regions, 50);
}
