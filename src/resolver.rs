//! Boot content resolution.
//!
//! The boot content of a title is `content/<cid>.app`, where `cid` is the
//! content ID of the TMD entry at `boot_index`. Priiloader breaks that rule
//! for the System Menu: it installs itself as the boot content and moves the
//! original to the same content ID with bit 28 set (`0000001f.app` becomes
//! `1000001f.app`).
//!
//! Priiloader is detected by the files it leaves in the title directory (see
//! [`PATCH_MARKERS`]). When present, the moved ID is read first; if that file
//! is missing the original ID is read instead, which covers installs that
//! left markers behind but restored the original layout.
//!
//! ```text
//! patched?  first read             fallback
//! no        content/<cid>.app      -
//! yes       content/<cid|flag>.app content/<cid>.app
//! ```

use tracing::{debug, info, warn};

use crate::formats::tmd::Tmd;
use crate::fs::FileSystem;
use crate::metadata::MetadataStore;
use crate::title::TitleId;
use crate::{Error, Result};

/// Files whose presence under a title directory means Priiloader is
/// installed, relative to `/title/<upper>/<lower>/`.
pub const PATCH_MARKERS: [&str; 7] = [
    "content/title_or.tmd",
    "data/loader.ini",
    "data/hackshas.ini",
    "data/hacksh_s.ini",
    "data/password.txt",
    "data/main.nfo",
    "data/main.bin",
];

/// Bit set on the content ID of a boot content moved aside by Priiloader.
pub const PATCHED_CONTENT_FLAG: u32 = 0x1000_0000;

/// Boot content bytes, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlob {
    data: Vec<u8>,
    /// Content ID of the file that was actually read.
    pub content_id: u32,
    /// Whether patch markers were found.
    pub patched: bool,
    /// Whether the unpatched path had to be used after the patched one failed.
    pub fallback: bool,
}

impl ContentBlob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Whether any of the [`PATCH_MARKERS`] exists under `title`.
///
/// Every marker is probed, without stopping at the first hit, so each one
/// found is logged.
pub fn patch_present<F: FileSystem + ?Sized>(fs: &F, title: TitleId) -> bool {
    let mut found = false;
    for marker in PATCH_MARKERS {
        let path = title.path(marker);
        if fs.exists(&path) {
            debug!(%title, path = %path, "patch marker found");
            found = true;
        }
    }
    found
}

/// Content ID the boot content is stored under.
pub fn boot_content_id(content_id: u32, patched: bool) -> u32 {
    if patched {
        PATCHED_CONTENT_FLAG | content_id
    } else {
        content_id
    }
}

/// Read the boot content of `title` as described by `tmd`.
///
/// Fails with [`Error::InvalidMetadata`] before touching `fs` if the boot
/// index is out of range, and with [`Error::ContentUnavailable`] once every
/// candidate path has failed.
///
/// The content is always looked up under the title directory. A boot entry
/// flagged as shared ([`crate::formats::tmd::TmdContent::is_shared`]) would
/// live in `/shared1` instead and is not located there; the System Menu never
/// boots shared content.
pub fn resolve_boot_content<F: FileSystem + ?Sized>(
    fs: &F,
    title: TitleId,
    tmd: &Tmd,
) -> Result<ContentBlob> {
    let cid = tmd.boot_content()?.content_id;
    let patched = patch_present(fs, title);

    let first = boot_content_id(cid, patched);
    if let Some(data) = try_read(fs, title, first) {
        info!(%title, content_id = first, size = data.len(), patched, "boot content resolved");
        return Ok(ContentBlob {
            data,
            content_id: first,
            patched,
            fallback: false,
        });
    }

    if patched {
        warn!(%title, content_id = cid, "patched boot content missing, trying original");
        if let Some(data) = try_read(fs, title, cid) {
            info!(%title, content_id = cid, size = data.len(), "boot content resolved via fallback");
            return Ok(ContentBlob {
                data,
                content_id: cid,
                patched,
                fallback: true,
            });
        }
    }

    warn!(%title, content_id = cid, patched, "boot content unavailable");
    Err(Error::ContentUnavailable {
        title,
        content_id: cid,
    })
}

/// Fetch the TMD of `title` from `store`, then resolve its boot content.
pub fn resolve_title<F, M>(fs: &F, store: &M, title: TitleId) -> Result<ContentBlob>
where
    F: FileSystem + ?Sized,
    M: MetadataStore + ?Sized,
{
    let tmd = store.title_metadata(title)?;
    resolve_boot_content(fs, title, &tmd)
}

fn try_read<F: FileSystem + ?Sized>(fs: &F, title: TitleId, content_id: u32) -> Option<Vec<u8>> {
    let path = title.content_path(content_id);
    match fs.read(&path) {
        Ok(data) => Some(data),
        Err(e) => {
            debug!(%title, path = %path, error = %e, "content read failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::formats::tmd::fixture;
    use crate::fs::MemoryFs;
    use crate::metadata::NandMetadata;

    /// Records every path it is asked about.
    #[derive(Default)]
    struct RecordingFs {
        inner: MemoryFs,
        probes: RefCell<Vec<String>>,
        reads: RefCell<Vec<String>>,
    }

    impl RecordingFs {
        fn new(inner: MemoryFs) -> Self {
            Self {
                inner,
                ..Default::default()
            }
        }
    }

    impl FileSystem for RecordingFs {
        fn exists(&self, path: &str) -> bool {
            self.probes.borrow_mut().push(path.to_owned());
            self.inner.exists(path)
        }

        fn read(&self, path: &str) -> Result<Vec<u8>> {
            self.reads.borrow_mut().push(path.to_owned());
            self.inner.read(path)
        }
    }

    fn tmd(title: TitleId, boot_index: u16, cids: &[u32]) -> Tmd {
        Tmd::from_bytes(&fixture(title, 514, boot_index, cids)).unwrap()
    }

    const TITLE: TitleId = TitleId::from_parts(0x0000_0001, 0x0000_0002);

    #[test]
    fn no_markers_means_unpatched() {
        let fs = RecordingFs::new(MemoryFs::new());
        assert!(!patch_present(&fs, TITLE));
        assert_eq!(fs.probes.borrow().len(), PATCH_MARKERS.len());
    }

    #[test]
    fn every_marker_is_detected() {
        for marker in PATCH_MARKERS {
            let fs = MemoryFs::new().with(TITLE.path(marker), b"".to_vec());
            assert!(patch_present(&fs, TITLE), "{marker}");
        }
    }

    #[test]
    fn probes_all_markers_even_after_a_hit() {
        let fs = RecordingFs::new(
            MemoryFs::new().with("/title/00000001/00000002/content/title_or.tmd", vec![0]),
        );
        assert!(patch_present(&fs, TITLE));
        let probes = fs.probes.borrow();
        assert_eq!(probes.len(), 7);
        assert_eq!(probes[0], "/title/00000001/00000002/content/title_or.tmd");
        assert_eq!(probes[6], "/title/00000001/00000002/data/main.bin");
    }

    #[test]
    fn markers_of_other_titles_are_ignored() {
        let other = TitleId::from_parts(0x0001_0001, 0x4841_4341);
        let fs = MemoryFs::new().with(other.path("data/loader.ini"), vec![0]);
        assert!(!patch_present(&fs, TITLE));
    }

    #[test]
    fn unpatched_reads_exactly_one_path() {
        let fs = RecordingFs::new(MemoryFs::new().with(TITLE.content_path(0x97), b"menu".to_vec()));
        let blob = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 1, &[0x1c, 0x97])).unwrap();

        assert_eq!(blob.as_bytes(), b"menu");
        assert_eq!(blob.len(), 4);
        assert_eq!(blob.content_id, 0x97);
        assert!(!blob.patched);
        assert!(!blob.fallback);
        assert_eq!(*fs.reads.borrow(), ["/title/00000001/00000002/content/00000097.app"]);
    }

    #[test]
    fn unpatched_never_retries() {
        // A flagged file alone must not be picked up without markers.
        let fs = RecordingFs::new(MemoryFs::new().with(TITLE.content_path(0x1000_0097), vec![1]));
        let err = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 0, &[0x97])).unwrap_err();

        assert!(matches!(err, Error::ContentUnavailable { content_id: 0x97, .. }));
        assert_eq!(fs.reads.borrow().len(), 1);
    }

    #[test]
    fn patched_reads_flagged_path_first() {
        let fs = RecordingFs::new(
            MemoryFs::new()
                .with(TITLE.path("data/loader.ini"), vec![0])
                .with(TITLE.content_path(0x1000_0005), b"original".to_vec())
                .with(TITLE.content_path(0x5), b"priiloader".to_vec()),
        );
        let blob = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 0, &[0x5])).unwrap();

        assert_eq!(blob.as_bytes(), b"original");
        assert_eq!(blob.content_id, 0x1000_0005);
        assert!(blob.patched);
        assert!(!blob.fallback);
        assert_eq!(
            *fs.reads.borrow(),
            ["/title/00000001/00000002/content/10000005.app"]
        );
    }

    #[test]
    fn patched_falls_back_to_original_id() {
        let fs = RecordingFs::new(
            MemoryFs::new()
                .with(TITLE.path("data/main.nfo"), vec![0])
                .with(TITLE.content_path(0x5), b"menu".to_vec()),
        );
        let blob = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 0, &[0x5])).unwrap();

        assert_eq!(blob.into_bytes(), b"menu");
        assert_eq!(
            *fs.reads.borrow(),
            [
                "/title/00000001/00000002/content/10000005.app",
                "/title/00000001/00000002/content/00000005.app",
            ]
        );
    }

    #[test]
    fn fallback_is_flagged_on_blob() {
        let fs = MemoryFs::new()
            .with(TITLE.path("data/main.nfo"), vec![0])
            .with(TITLE.content_path(0x5), b"menu".to_vec());
        let blob = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 0, &[0x5])).unwrap();
        assert!(blob.patched);
        assert!(blob.fallback);
        assert_eq!(blob.content_id, 0x5);
    }

    #[test]
    fn patched_and_both_missing() {
        let fs = RecordingFs::new(MemoryFs::new().with(TITLE.path("data/password.txt"), vec![0]));
        let err = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 0, &[0x5])).unwrap_err();

        assert!(matches!(
            err,
            Error::ContentUnavailable { title: TITLE, content_id: 0x5 }
        ));
        assert_eq!(fs.reads.borrow().len(), 2);
    }

    #[test]
    fn bad_boot_index_fails_before_any_access() {
        let fs = RecordingFs::new(MemoryFs::new().with(TITLE.content_path(0x5), vec![0]));
        let err = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 1, &[0x5])).unwrap_err();

        assert!(matches!(err, Error::InvalidMetadata { boot_index: 1, content_count: 1 }));
        assert!(fs.probes.borrow().is_empty());
        assert!(fs.reads.borrow().is_empty());
    }

    #[test]
    fn empty_content_list() {
        let fs = MemoryFs::new();
        let err = resolve_boot_content(&fs, TITLE, &tmd(TITLE, 0, &[])).unwrap_err();
        assert!(matches!(err, Error::InvalidMetadata { content_count: 0, .. }));
    }

    #[test]
    fn resolves_through_metadata_store() {
        let fs = MemoryFs::new()
            .with(TITLE.tmd_path(), fixture(TITLE, 514, 0, &[0x97]))
            .with(TITLE.content_path(0x97), b"menu".to_vec());
        let store = NandMetadata::new(&fs);

        let blob = resolve_title(&fs, &store, TITLE).unwrap();
        assert_eq!(blob.as_bytes(), b"menu");
    }

    #[test]
    fn shared_boot_content_is_read_from_title_dir() {
        let mut tmd = tmd(TITLE, 0, &[0x5]);
        tmd.contents[0].content_type = 0x8001;
        assert!(tmd.contents[0].is_shared());

        let fs = RecordingFs::new(MemoryFs::new().with(TITLE.content_path(0x5), b"menu".to_vec()));
        let blob = resolve_boot_content(&fs, TITLE, &tmd).unwrap();
        assert_eq!(blob.as_bytes(), b"menu");
        assert_eq!(*fs.reads.borrow(), ["/title/00000001/00000002/content/00000005.app"]);
    }

    #[test]
    fn flag_bit() {
        assert_eq!(boot_content_id(0x5, true), 0x1000_0005);
        assert_eq!(boot_content_id(0x5, false), 0x5);
        assert_eq!(boot_content_id(0x1000_0005, true), 0x1000_0005);
    }
}
