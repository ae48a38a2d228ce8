//! DDS file assembly: header plus concatenated mip payloads.

use std::fs;
use std::io;
use std::path::Path;

use crate::dds::header::DdsHeader;

/// Assemble a complete DDS file in memory.
///
/// `mips` holds the compressed payloads, level 0 first; they are written
/// back to back with no padding.
pub fn encode_file(width: u32, height: u32, mips: &[Vec<u8>]) -> Vec<u8> {
    let payload_len: usize = mips.iter().map(Vec::len).sum();
    let header = DdsHeader::new(width, height, mips.len() as u32);

    let mut bytes = header.to_bytes();
    bytes.reserve(payload_len);
    for mip in mips {
        bytes.extend_from_slice(mip);
    }
    bytes
}

/// Write a complete DDS file to disk.
pub fn write_file(path: &Path, width: u32, height: u32, mips: &[Vec<u8>]) -> io::Result<()> {
    fs::write(path, encode_file(width, height, mips))
}
