//! TMD (Title Metadata) - signed descriptor of an installed title.
//!
//! Stored on NAND as `/title/<upper>/<lower>/content/title.tmd`. Lists every
//! content of the title, names the boot content, and carries the title
//! version that [`crate::version`] and [`crate::region`] classify.
//!
//! ## Signed blob
//! ```text
//! [0x00] SignatureType (u32 BE)
//!        0x00010000 RSA-4096: Signature 0x200, Padding 0x3C
//!        0x00010001 RSA-2048: Signature 0x100, Padding 0x3C
//!        0x00010002 ECC-B233: Signature 0x03C, Padding 0x40
//! [0x04] Signature
//!        Padding
//!        TMD header
//! ```
//!
//! ## Header (offsets relative to the header start; 0x140 for RSA-2048)
//! ```text
//! [0x00] Issuer                (0x40, null-padded ASCII)
//! [0x40] Version               (u8)
//! [0x41] CaCrlVersion          (u8)
//! [0x42] SignerCrlVersion      (u8)
//! [0x43] IsVWii                (u8)
//! [0x44] SystemVersion         (u64 BE) - IOS the title runs under
//! [0x4C] TitleId               (u64 BE)
//! [0x54] TitleType             (u32 BE)
//! [0x58] GroupId               (u16 BE)
//! [0x5A] Reserved              (u16)
//! [0x5C] Region                (u16 BE)
//! [0x5E] Ratings               (0x10)
//! [0x6E] Reserved              (0x0C)
//! [0x7A] IpcMask               (0x0C)
//! [0x86] Reserved              (0x12)
//! [0x98] AccessRights          (u32 BE)
//! [0x9C] TitleVersion          (u16 BE)
//! [0x9E] NumContents           (u16 BE)
//! [0xA0] BootIndex             (u16 BE)
//! [0xA2] Reserved              (u16)
//! [0xA4] ContentRecords        (NumContents × 0x24)
//! ```
//!
//! ## Content record (0x24 bytes)
//! ```text
//! [0x00] ContentId             (u32 BE) - names the `.app` file
//! [0x04] Index                 (u16 BE)
//! [0x06] Type                  (u16 BE) - 0x0001 normal, 0x8001 shared
//! [0x08] Size                  (u64 BE)
//! [0x10] SHA-1 of the content  (0x14)
//! ```
//!
//! The signature is not verified.

use std::io::{Cursor, Read};

use crate::title::TitleId;
use crate::utils::{be_u16, be_u32, be_u64, bytesa, null_padded_string, skip, u8};
use crate::{Error, Result};

/// Signature scheme of a signed blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    Rsa4096,
    Rsa2048,
    Ecc,
}

impl TryFrom<u32> for SignatureType {
    type Error = Error;
    fn try_from(v: u32) -> Result<Self> {
        match v {
            0x0001_0000 => Ok(Self::Rsa4096),
            0x0001_0001 => Ok(Self::Rsa2048),
            0x0001_0002 => Ok(Self::Ecc),
            x => Err(Error::UnsupportedSignature(x)),
        }
    }
}

impl SignatureType {
    /// Signature length in bytes.
    pub fn signature_len(self) -> u64 {
        match self {
            Self::Rsa4096 => 0x200,
            Self::Rsa2048 => 0x100,
            Self::Ecc => 0x3C,
        }
    }

    /// Padding that aligns the signed body to 0x40.
    pub fn padding_len(self) -> u64 {
        match self {
            Self::Rsa4096 | Self::Rsa2048 => 0x3C,
            Self::Ecc => 0x40,
        }
    }

    /// Offset of the signed body from the start of the blob.
    pub fn body_offset(self) -> u64 {
        4 + self.signature_len() + self.padding_len()
    }
}

/// One entry of the TMD content list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdContent {
    /// Content ID; the on-NAND file is `content/<id:08x>.app`.
    pub content_id: u32,
    pub index: u16,
    pub content_type: u16,
    /// Content size in bytes.
    pub size: u64,
    pub sha1: [u8; 20],
}

impl TmdContent {
    /// Shared contents live in `/shared1` instead of the title directory.
    pub fn is_shared(&self) -> bool {
        self.content_type & 0x8000 != 0
    }
}

/// Parsed TMD.
#[derive(Debug, Clone)]
pub struct Tmd {
    pub signature_type: SignatureType,
    /// Certificate chain that signed this TMD, e.g. `Root-CA00000001-CP00000004`.
    pub issuer: String,
    pub version: u8,
    pub ca_crl_version: u8,
    pub signer_crl_version: u8,
    pub is_vwii: bool,
    /// Title ID of the IOS this title runs under.
    pub sys_version: u64,
    pub title_id: TitleId,
    pub title_type: u32,
    pub group_id: u16,
    pub region: u16,
    pub access_rights: u32,
    /// Raw title version; for the System Menu this is the firmware version.
    pub title_version: u16,
    /// Index into `contents` of the content that boots.
    pub boot_index: u16,
    /// Content records in declaration order.
    pub contents: Vec<TmdContent>,
}

impl Tmd {
    /// Parse a signed TMD from `r`.
    ///
    /// The reader must be positioned at the signature type. The boot index is
    /// not validated here; see [`Tmd::boot_content`].
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let signature_type = SignatureType::try_from(be_u32(r)?)?;
        skip(r, signature_type.signature_len() + signature_type.padding_len())?;

        // 0x00: Issuer
        let issuer = null_padded_string(&bytesa::<0x40>(r)?);
        // 0x40..0x44: format and CRL versions, vWii flag
        let version = u8(r)?;
        let ca_crl_version = u8(r)?;
        let signer_crl_version = u8(r)?;
        let is_vwii = u8(r)? != 0;
        // 0x44: SystemVersion
        let sys_version = be_u64(r)?;
        // 0x4C: TitleId
        let title_id = TitleId(be_u64(r)?);
        // 0x54: TitleType
        let title_type = be_u32(r)?;
        // 0x58: GroupId
        let group_id = be_u16(r)?;
        let _reserved = be_u16(r)?;
        // 0x5C: Region
        let region = be_u16(r)?;
        // 0x5E: Ratings, reserved, IPC mask, reserved
        skip(r, 0x10 + 0x0C + 0x0C + 0x12)?;
        // 0x98: AccessRights
        let access_rights = be_u32(r)?;
        // 0x9C: TitleVersion
        let title_version = be_u16(r)?;
        // 0x9E: NumContents
        let num_contents = be_u16(r)?;
        // 0xA0: BootIndex
        let boot_index = be_u16(r)?;
        let _reserved = be_u16(r)?;

        let mut contents = Vec::with_capacity(num_contents as usize);
        for _ in 0..num_contents {
            let content_id = be_u32(r)?;
            let index = be_u16(r)?;
            let content_type = be_u16(r)?;
            let size = be_u64(r)?;
            let sha1 = bytesa::<0x14>(r)?;
            contents.push(TmdContent {
                content_id,
                index,
                content_type,
                size,
                sha1,
            });
        }

        Ok(Self {
            signature_type,
            issuer,
            version,
            ca_crl_version,
            signer_crl_version,
            is_vwii,
            sys_version,
            title_id,
            title_type,
            group_id,
            region,
            access_rights,
            title_version,
            boot_index,
            contents,
        })
    }

    /// Parse a TMD held entirely in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(data))
    }

    /// The content record at `boot_index`.
    ///
    /// Returns [`Error::InvalidMetadata`] if the index is out of range.
    pub fn boot_content(&self) -> Result<&TmdContent> {
        self.contents
            .get(self.boot_index as usize)
            .ok_or(Error::InvalidMetadata {
                boot_index: self.boot_index,
                content_count: self.contents.len(),
            })
    }

    /// Find a content record by content ID.
    pub fn content_by_id(&self, content_id: u32) -> Option<&TmdContent> {
        self.contents.iter().find(|c| c.content_id == content_id)
    }
}

/// Build an RSA-2048 signed TMD for tests.
#[cfg(test)]
pub(crate) fn fixture(
    title_id: TitleId,
    title_version: u16,
    boot_index: u16,
    content_ids: &[u32],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0001u32.to_be_bytes());
    out.resize(0x140, 0);

    let mut issuer = [0u8; 0x40];
    issuer[..26].copy_from_slice(b"Root-CA00000001-CP00000004");
    out.extend_from_slice(&issuer);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(&0x0000_0001_0000_0050u64.to_be_bytes());
    out.extend_from_slice(&title_id.0.to_be_bytes());
    out.extend_from_slice(&1u32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&2u16.to_be_bytes());
    out.extend_from_slice(&[0u8; 0x10 + 0x0C + 0x0C + 0x12]);
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&title_version.to_be_bytes());
    out.extend_from_slice(&(content_ids.len() as u16).to_be_bytes());
    out.extend_from_slice(&boot_index.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    for (i, cid) in content_ids.iter().enumerate() {
        out.extend_from_slice(&cid.to_be_bytes());
        out.extend_from_slice(&(i as u16).to_be_bytes());
        out.extend_from_slice(&1u16.to_be_bytes());
        out.extend_from_slice(&0x1000u64.to_be_bytes());
        out.extend_from_slice(&[i as u8; 0x14]);
    }
    out
}
