//! DDS header construction and parsing.
//!
//! The bump convention predates DX10: a 4-byte magic followed by a
//! 124-byte `DDSURFACEDESC2` with a FourCC pixel format. Every field
//! except width, height and mip count is fixed, so the header type
//! carries just those three and serializes the rest as constants,
//! field by field, little-endian.

use thiserror::Error;

/// `"DDS "` little-endian.
pub const DDS_MAGIC: u32 = 0x2053_4444;
/// `"DXT5"` little-endian.
pub const FOURCC_DXT5: u32 = 0x3554_5844;
/// Magic plus surface descriptor.
pub const HEADER_SIZE: usize = 128;

const DESC_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

// DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_MIPMAPCOUNT
const HEADER_FLAGS: u32 = 0x0002_1007;
// DDPF_FOURCC
const PIXEL_FORMAT_FLAGS: u32 = 0x0000_0004;
// DDSCAPS_TEXTURE | DDSCAPS_MIPMAP
const HEADER_CAPS: u32 = 0x0040_1000;

/// Reasons a byte stream is not a bump-convention DDS header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DdsParseError {
    #[error("file too short for a DDS header: {0} bytes")]
    Truncated(usize),
    #[error("bad DDS magic 0x{0:08X}")]
    BadMagic(u32),
    #[error("unexpected surface descriptor size {0}")]
    BadDescriptorSize(u32),
    #[error("unsupported pixel format (FourCC 0x{0:08X})")]
    UnsupportedFormat(u32),
}

/// The variable part of a bump-convention DDS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsHeader {
    pub width: u32,
    pub height: u32,
    pub mipmap_count: u32,
}

impl DdsHeader {
    pub fn new(width: u32, height: u32, mipmap_count: u32) -> Self {
        Self {
            width,
            height,
            mipmap_count,
        }
    }

    /// Serialize the full 128-byte header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        let mut push = |v: u32| bytes.extend_from_slice(&v.to_le_bytes());

        push(DDS_MAGIC);
        push(DESC_SIZE);
        push(HEADER_FLAGS);
        push(self.height);
        push(self.width);
        push(0); // pitch / linear size
        push(0); // back buffer count
        push(self.mipmap_count);
        push(0); // alpha bit depth
        push(0); // reserved
        push(0); // surface pointer
        for _ in 0..8 {
            push(0); // four color keys
        }
        push(PIXEL_FORMAT_SIZE);
        push(PIXEL_FORMAT_FLAGS);
        push(FOURCC_DXT5);
        for _ in 0..5 {
            push(0); // RGB bit count and channel masks
        }
        push(HEADER_CAPS);
        push(0); // caps2
        push(0); // caps3
        push(0); // caps4
        push(0); // reserved

        debug_assert_eq!(bytes.len(), HEADER_SIZE);
        bytes
    }

    /// Parse the variable fields back out of a serialized header.
    pub fn parse(bytes: &[u8]) -> Result<Self, DdsParseError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DdsParseError::Truncated(bytes.len()));
        }

        let read = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        let magic = read(0);
        if magic != DDS_MAGIC {
            return Err(DdsParseError::BadMagic(magic));
        }

        let desc_size = read(4);
        if desc_size != DESC_SIZE {
            return Err(DdsParseError::BadDescriptorSize(desc_size));
        }

        let fourcc = read(84);
        if fourcc != FOURCC_DXT5 {
            return Err(DdsParseError::UnsupportedFormat(fourcc));
        }

        Ok(Self {
            height: read(12),
            width: read(16),
            mipmap_count: read(28),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_128_bytes() {
        assert_eq!(DdsHeader::new(256, 256, 7).to_bytes().len(), HEADER_SIZE);
    }

    #[test]
    fn test_header_magic_and_fourcc() {
        let bytes = DdsHeader::new(64, 64, 5).to_bytes();
        assert_eq!(&bytes[0..4], b"DDS ");
        assert_eq!(&bytes[84..88], b"DXT5");
    }

    #[test]
    fn test_header_bytes_exact() {
        // The full header for an 8×8 surface with 3 mips, per the
        // DDSURFACEDESC2 layout the target engines read.
        let mut expected = [0u8; HEADER_SIZE];
        let mut put = |offset: usize, v: u32| {
            expected[offset..offset + 4].copy_from_slice(&v.to_le_bytes())
        };
        put(0, DDS_MAGIC);
        put(4, 124);
        put(8, 0x0002_1007);
        put(12, 8); // height
        put(16, 8); // width
        put(28, 3); // mipmap count
        put(76, 32); // ddpf size
        put(80, 0x0000_0004); // ddpf flags
        put(84, FOURCC_DXT5);
        put(108, 0x0040_1000); // caps

        assert_eq!(DdsHeader::new(8, 8, 3).to_bytes(), expected);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = DdsHeader::new(1024, 512, 9);
        let parsed = DdsHeader::parse(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_parse_rejects_short_input() {
        assert_eq!(
            DdsHeader::parse(&[0u8; 64]),
            Err(DdsParseError::Truncated(64))
        );
    }

    #[test]
    fn test_parse_rejects_bad_magic() {
        let mut bytes = DdsHeader::new(8, 8, 1).to_bytes();
        bytes[0] = b'X';
        assert!(matches!(
            DdsHeader::parse(&bytes),
            Err(DdsParseError::BadMagic(_))
        ));
    }

    #[test]
    fn test_parse_rejects_foreign_fourcc() {
        let mut bytes = DdsHeader::new(8, 8, 1).to_bytes();
        bytes[84..88].copy_from_slice(b"DXT1");
        assert!(matches!(
            DdsHeader::parse(&bytes),
            Err(DdsParseError::UnsupportedFormat(_))
        ));
    }
}
