//! System Menu identification.
//!
//! Ties the classifiers and the resolver together the way a diagnostic tool
//! reports the System Menu: one TMD lookup for the raw version, two table
//! lookups for its label, and one boot content resolution.

use std::fmt;

use tracing::{debug, info};

use crate::Result;
use crate::fs::FileSystem;
use crate::metadata::MetadataStore;
use crate::region::{RegionCode, classify_region};
use crate::resolver::{ContentBlob, resolve_boot_content};
use crate::title::TitleId;
use crate::version::{SemanticVersion, classify_version};

/// Semantic version and region of a raw firmware version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub version: SemanticVersion,
    pub region: RegionCode,
}

impl Classification {
    /// Look `raw` up in both tables.
    pub fn of(raw: u32) -> Self {
        Self {
            version: classify_version(raw),
            region: classify_region(raw),
        }
    }

    /// True if either table did not know the raw value.
    pub fn is_partial(&self) -> bool {
        self.version.is_unknown() || self.region.is_unknown()
    }
}

/// Formats as `4.3E`.
impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.version, self.region)
    }
}

/// Everything the probe learns about an installed System Menu.
#[derive(Debug, Clone)]
pub struct SystemMenuReport {
    pub title: TitleId,
    /// Raw title version from the TMD.
    pub raw_version: u32,
    pub classification: Classification,
    /// IOS the System Menu runs under, e.g. `00000001-00000050`.
    pub ios_title: TitleId,
    /// Title version of that IOS, if its TMD is installed.
    pub ios_revision: Option<u32>,
    /// Title version of boot2, if its TMD is installed.
    pub boot2_version: Option<u32>,
    pub boot_content: ContentBlob,
}

impl SystemMenuReport {
    /// Probe the System Menu.
    pub fn probe<F, M>(fs: &F, store: &M) -> Result<Self>
    where
        F: FileSystem + ?Sized,
        M: MetadataStore + ?Sized,
    {
        Self::probe_title(fs, store, TitleId::SYSTEM_MENU)
    }

    /// Probe an arbitrary title the same way.
    pub fn probe_title<F, M>(fs: &F, store: &M, title: TitleId) -> Result<Self>
    where
        F: FileSystem + ?Sized,
        M: MetadataStore + ?Sized,
    {
        let tmd = store.title_metadata(title)?;
        let raw_version = tmd.title_version as u32;
        let classification = Classification::of(raw_version);
        info!(%title, raw_version, %classification, "classified");

        let boot_content = resolve_boot_content(fs, title, &tmd)?;

        let ios_title = TitleId(tmd.sys_version);
        Ok(Self {
            title,
            raw_version,
            classification,
            ios_title,
            ios_revision: optional_version(store, ios_title),
            boot2_version: optional_version(store, TitleId::BOOT2),
            boot_content,
        })
    }

    /// IOS slot number, e.g. 80 for IOS80.
    pub fn ios_slot(&self) -> u32 {
        self.ios_title.lower()
    }
}

fn optional_version<M: MetadataStore + ?Sized>(store: &M, title: TitleId) -> Option<u32> {
    store
        .firmware_version(title)
        .inspect_err(|e| debug!(%title, error = %e, "title version unavailable"))
        .ok()
}
