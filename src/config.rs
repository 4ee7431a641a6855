//! Probe configuration.
//!
//! A plain `name = value` text file, one entry per line. Blank lines and
//! lines starting with `;` or `#` are ignored, as are unknown names.
//!
//! ```text
//! ; NAND dump extracted by a backup tool
//! nand_root = /home/me/wii/nand
//! title_id  = 00000001-00000002
//! log       = sysmenu=debug
//! ```
//!
//! | Name | Default | Meaning |
//! |------|---------|---------|
//! | `nand_root` | required | Host directory standing in for NAND `/` |
//! | `title_id`  | `0000000100000002` | Title to probe, 16 hex digits (a `-` between halves is allowed) |
//! | `log`       | `info` | `tracing` filter directive |

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::title::TitleId;
use crate::{Error, Result};

/// Settings for a probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub nand_root: PathBuf,
    pub title_id: TitleId,
    pub log: String,
}

impl ProbeConfig {
    /// Defaults for everything but the NAND root.
    pub fn new(nand_root: impl Into<PathBuf>) -> Self {
        Self {
            nand_root: nand_root.into(),
            title_id: TitleId::SYSTEM_MENU,
            log: "info".to_owned(),
        }
    }

    /// Load a config file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(File::open(path)?)
    }

    /// Load from a `name = value` reader.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let mut nand_root = None;
        let mut title_id = TitleId::SYSTEM_MENU;
        let mut log = "info".to_owned();

        for line in BufReader::new(reader).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                return Err(Error::Config(format!("expected `name = value`: {line}")));
            };
            let value = value.trim();
            match name.trim() {
                "nand_root" => nand_root = Some(PathBuf::from(value)),
                "title_id" => title_id = parse_title_id(value)?,
                "log" => log = value.to_owned(),
                _ => {}
            }
        }

        let nand_root = nand_root.ok_or_else(|| Error::Config("nand_root is not set".into()))?;
        Ok(Self {
            nand_root,
            title_id,
            log,
        })
    }
}

/// Parse `0000000100000002` or `00000001-00000002`.
pub fn parse_title_id(s: &str) -> Result<TitleId> {
    let digits: String = s.trim().chars().filter(|&c| c != '-').collect();
    if digits.len() != 16 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Config(format!("invalid title id: {s}")));
    }
    u64::from_str_radix(&digits, 16)
        .map(TitleId)
        .map_err(|_| Error::Config(format!("invalid title id: {s}")))
}
