//! Parsers for Wii binary formats.
//!
//! Parsers follow the same conventions:
//!
//! * **Generic over** [`std::io::Read`] - pass a [`std::fs::File`], a
//!   [`std::io::Cursor`], or anything else that reads.
//! * **Big-endian** - every multi-byte field on the Wii is big-endian.
//! * **No signature checks** - signed blobs are parsed, not verified.
//!
//! | Module  | Format | Description |
//! |---------|--------|-------------|
//! | [`tmd`] | TMD    | Signed title metadata: title version, content list, boot index |

pub mod tmd;
