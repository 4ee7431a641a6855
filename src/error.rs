//! Library-wide error and result types.

use std::io;

use thiserror::Error;

use crate::title::TitleId;

/// Result alias used throughout sysmenu.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// An unrecognised firmware version is deliberately absent: the classifiers
/// answer with sentinel values ([`crate::version::SemanticVersion::UNKNOWN`],
/// [`crate::region::RegionCode::X`]) instead of failing.
#[derive(Debug, Error)]
pub enum Error {
    /// The TMD boot index does not point at a content record.
    #[error("boot index {boot_index} out of range ({content_count} contents)")]
    InvalidMetadata { boot_index: u16, content_count: usize },
    /// Neither the patched nor the original boot content could be read.
    #[error("boot content {content_id:08x} of title {title} unavailable")]
    ContentUnavailable { title: TitleId, content_id: u32 },
    /// A path does not exist in the backing filesystem.
    #[error("not found: {0}")]
    NotFound(String),
    /// A NAND path was relative or tried to escape the filesystem root.
    #[error("invalid NAND path: {0}")]
    InvalidPath(String),
    /// The stream ended before all expected bytes could be read.
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// The signed blob uses a signature type this parser does not know.
    #[error("unsupported signature type: {0:#010x}")]
    UnsupportedSignature(u32),
    /// A structural constraint was violated (message describes which one).
    #[error("parse error: {0}")]
    Parse(&'static str),
    /// A configuration value was missing or malformed.
    #[error("config error: {0}")]
    Config(String),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(e)
        }
    }
}
