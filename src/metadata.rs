//! Title metadata lookup.

use tracing::debug;

use crate::Result;
use crate::formats::tmd::Tmd;
use crate::fs::FileSystem;
use crate::title::TitleId;

/// Source of installed titles' metadata.
pub trait MetadataStore {
    /// The stored TMD of `title`.
    fn title_metadata(&self, title: TitleId) -> Result<Tmd>;

    /// Raw firmware version of `title`, i.e. its TMD title version.
    fn firmware_version(&self, title: TitleId) -> Result<u32> {
        Ok(self.title_metadata(title)?.title_version as u32)
    }
}

/// [`MetadataStore`] that reads `content/title.tmd` from a NAND filesystem.
#[derive(Debug, Clone)]
pub struct NandMetadata<F> {
    fs: F,
}

impl<F: FileSystem> NandMetadata<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn into_inner(self) -> F {
        self.fs
    }
}

impl<F: FileSystem> MetadataStore for NandMetadata<F> {
    fn title_metadata(&self, title: TitleId) -> Result<Tmd> {
        let path = title.tmd_path();
        debug!(%title, path = %path, "reading title metadata");
        let data = self.fs.read(&path)?;
        Tmd::from_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::formats::tmd::fixture;
    use crate::fs::MemoryFs;

    #[test]
    fn reads_stored_tmd() {
        let title = TitleId::SYSTEM_MENU;
        let fs = MemoryFs::new().with(title.tmd_path(), fixture(title, 513, 0, &[0x97]));
        let store = NandMetadata::new(fs);

        let tmd = store.title_metadata(title).unwrap();
        assert_eq!(tmd.contents[0].content_id, 0x97);
        assert_eq!(store.firmware_version(title).unwrap(), 513);
    }

    #[test]
    fn missing_title() {
        let store = NandMetadata::new(MemoryFs::new());
        assert!(matches!(
            store.firmware_version(TitleId::SYSTEM_MENU),
            Err(Error::NotFound(_))
        ));
    }
}
