//! BC3 (DXT5) compression, reference decompression, and the DDS container.
//!
//! Everything this tool emits is BC3: 16-byte blocks covering 4×4 pixels,
//! an 8-byte two-endpoint alpha sub-block followed by an 8-byte RGB565
//! color sub-block. The encoder dispatches 4×4 tiles to one of three
//! quality tiers; the decoder reproduces the reconstruction the target
//! engines see, which the residual pass diffs against.

mod decoder;
mod encoder;
mod header;
mod writer;

pub use decoder::{decode_alpha_block, decode_color_block, decompress_mip};
pub use encoder::{Bc3Encoder, Quality};
pub use header::{DdsHeader, DdsParseError, DDS_MAGIC, FOURCC_DXT5, HEADER_SIZE};
pub use writer::{encode_file, write_file};
