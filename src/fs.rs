//! Read-only access to the NAND filesystem.
//!
//! The resolver only ever asks two questions of storage: does a path exist,
//! and what bytes does it hold. [`FileSystem`] captures exactly that, so the
//! same logic runs against the console's flash filesystem, a NAND dump
//! extracted to disk ([`HostFs`]), or an in-memory fake ([`MemoryFs`]).
//!
//! Paths are absolute NAND paths such as
//! `/title/00000001/00000002/content/title.tmd`.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Minimal read-only filesystem.
pub trait FileSystem {
    /// Whether `path` names an existing file.
    fn exists(&self, path: &str) -> bool;

    /// Read the whole file at `path`.
    ///
    /// Returns [`Error::NotFound`] if it does not exist.
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// In-memory filesystem keyed by absolute path.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    /// Builder form of [`MemoryFs::insert`].
    pub fn with(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Remove a file, returning its contents.
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_owned()))
    }
}

/// NAND dump extracted to a directory on the host.
///
/// `/title/00000001/00000002/content/title.tmd` resolves to
/// `<root>/title/00000001/00000002/content/title.tmd`.
#[derive(Debug, Clone)]
pub struct HostFs {
    root: PathBuf,
}

impl HostFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an absolute NAND path onto the host.
    ///
    /// Relative paths and `..` components are rejected with
    /// [`Error::InvalidPath`].
    pub fn host_path(&self, path: &str) -> Result<PathBuf> {
        let rel = path
            .strip_prefix('/')
            .ok_or_else(|| Error::InvalidPath(path.to_owned()))?;
        let mut out = self.root.clone();
        for component in Path::new(rel).components() {
            match component {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                _ => return Err(Error::InvalidPath(path.to_owned())),
            }
        }
        Ok(out)
    }
}

impl FileSystem for HostFs {
    fn exists(&self, path: &str) -> bool {
        self.host_path(path).is_ok_and(|p| p.is_file())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let host = self.host_path(path)?;
        std::fs::read(&host).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.to_owned()),
            _ => Error::Io(e),
        })
    }
}
