//! Title identifiers and the NAND paths derived from them.
//!
//! A Wii title ID is a 64-bit value whose upper half names the title type
//! (`00000001` for system titles) and whose lower half names the instance
//! (`00000002` for the System Menu). Every installed title lives under
//! `/title/<upper>/<lower>/` on NAND:
//!
//! ```text
//! /title/00000001/00000002/
//!   content/title.tmd        signed title metadata
//!   content/0000001f.app     content, named by content ID
//!   data/                    title save data
//! ```

use std::fmt;

/// 64-bit title identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TitleId(pub u64);

impl TitleId {
    /// The System Menu (`00000001-00000002`).
    pub const SYSTEM_MENU: TitleId = TitleId(0x0000_0001_0000_0002);

    /// boot2 (`00000001-00000001`); its title version is the boot2 version.
    pub const BOOT2: TitleId = TitleId(0x0000_0001_0000_0001);

    /// The IOS in `slot`, e.g. `ios(80)` is `00000001-00000050`.
    pub const fn ios(slot: u32) -> Self {
        Self::from_parts(1, slot)
    }

    /// Build a title ID from its two halves.
    pub const fn from_parts(upper: u32, lower: u32) -> Self {
        Self(((upper as u64) << 32) | lower as u64)
    }

    /// Title type / group half.
    pub const fn upper(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Instance half.
    pub const fn lower(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    /// `/title/<upper>/<lower>/<relative>`.
    pub fn path(self, relative: &str) -> String {
        format!("/title/{:08x}/{:08x}/{relative}", self.upper(), self.lower())
    }

    /// `/title/<upper>/<lower>/content/<content_id>.app`.
    pub fn content_path(self, content_id: u32) -> String {
        self.path(&format!("content/{content_id:08x}.app"))
    }

    /// `/title/<upper>/<lower>/content/title.tmd`.
    pub fn tmd_path(self) -> String {
        self.path("content/title.tmd")
    }
}

impl From<u64> for TitleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}-{:08x}", self.upper(), self.lower())
    }
}
