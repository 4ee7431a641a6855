//! **sysmenu** - identify an installed Wii System Menu and locate its boot
//! content.
//!
//! # Modules
//! | Module | Purpose |
//! |--------|---------|
//! | [`version`]  | Raw title version → semantic version (`514` → 4.3) |
//! | [`region`]   | Raw title version → region letter (`514` → E) |
//! | [`resolver`] | Priiloader detection and boot content lookup |
//! | [`sysmenu`]  | Both of the above composed into one report |
//! | [`formats::tmd`] | Signed title metadata parser |
//! | [`fs`]       | Read-only NAND access: [`fs::HostFs`], [`fs::MemoryFs`] |
//! | [`metadata`] | TMD lookup by title ID |
//! | [`config`]   | `name = value` probe configuration |
//!
//! # Example
//! ```no_run
//! use sysmenu::fs::HostFs;
//! use sysmenu::metadata::NandMetadata;
//! use sysmenu::sysmenu::SystemMenuReport;
//!
//! # fn main() -> sysmenu::Result<()> {
//! let nand = HostFs::new("nand");
//! let store = NandMetadata::new(&nand);
//! let report = SystemMenuReport::probe(&nand, &store)?;
//! println!("System Menu {} ({} bytes boot content)", report.classification, report.boot_content.len());
//! # Ok(())
//! # }
//! ```
//!
//! Events are emitted through `tracing`; install a subscriber to see them.

pub mod config;
pub mod error;
pub mod formats;
pub mod fs;
pub mod metadata;
pub mod region;
pub mod resolver;
pub mod sysmenu;
pub mod title;
pub(crate) mod utils;
pub mod version;

pub use error::{Error, Result};
pub use title::TitleId;
