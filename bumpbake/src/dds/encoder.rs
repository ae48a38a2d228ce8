//! BC3 compression with selectable quality tiers.
//!
//! The tiler walks a bitmap in row-major 4×4 blocks, gathers each block
//! into a 64-byte interleaved RGBA buffer, and hands it to the tier's
//! block encoder. Tier choice changes output bits only; block count and
//! layout are fixed by the dimensions.

use texpresso::{Algorithm, Format, Params};

use crate::bitmap::Bitmap;
use crate::pixel::{Pixel, Rgba};

/// Compression quality tier, slowest-and-best last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quality {
    /// Single-pass range fit.
    Fast,
    /// Cluster fit.
    Balanced,
    /// Iterative cluster fit.
    #[default]
    Best,
}

impl Quality {
    /// Map a numeric tier to a quality level. Tiers 0 and 1 select the
    /// fast and balanced back-ends; everything else selects best.
    pub fn from_tier(tier: i64) -> Self {
        match tier {
            0 => Quality::Fast,
            1 => Quality::Balanced,
            _ => Quality::Best,
        }
    }

    /// Block-compressor parameters for this tier.
    fn params(self) -> Params {
        let algorithm = match self {
            Quality::Fast => Algorithm::RangeFit,
            Quality::Balanced => Algorithm::ClusterFit,
            Quality::Best => Algorithm::IterativeClusterFit,
        };
        Params {
            algorithm,
            ..Params::default()
        }
    }
}

/// BC3 mip encoder.
#[derive(Debug, Clone, Copy)]
pub struct Bc3Encoder {
    quality: Quality,
}

impl Bc3Encoder {
    pub fn new(quality: Quality) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Compressed payload size for a `width × height` surface:
    /// `(w/4)·(h/4)` blocks of 16 bytes, i.e. `w·h` bytes.
    pub fn compressed_size(width: u32, height: u32) -> usize {
        (width as usize / 4) * (height as usize / 4) * 16
    }

    /// Compress one mip into a BC3 block payload.
    ///
    /// Dimensions must be at least 4 and divisible by 4, which holds for
    /// every level of a pipeline pyramid.
    pub fn compress_mip(&self, bmp: &Bitmap<Rgba>) -> Vec<u8> {
        let w = bmp.width();
        let h = bmp.height();
        debug_assert!(w >= 4 && h >= 4 && w % 4 == 0 && h % 4 == 0);

        let raw = bmp.to_raw();
        let row_bytes = w as usize * Rgba::CHANNELS;
        let params = self.quality.params();

        let mut out = vec![0u8; Self::compressed_size(w, h)];
        let mut offset = 0;
        let mut block = [0u8; 64];

        for y in (0..h as usize).step_by(4) {
            for x in (0..w as usize).step_by(4) {
                for row in 0..4 {
                    let src = (y + row) * row_bytes + x * Rgba::CHANNELS;
                    block[row * 16..row * 16 + 16].copy_from_slice(&raw[src..src + 16]);
                }

                Format::Bc3.compress(&block, 4, 4, params, &mut out[offset..offset + 16]);
                offset += 16;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dds::decoder::decompress_mip;

    fn noise_bitmap(w: u32, h: u32) -> Bitmap<Rgba> {
        let mut bmp = Bitmap::new(w, h);
        for y in 0..h {
            for x in 0..w {
                // Cheap deterministic hash, enough to exercise the fitters.
                let v = (x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17))) as u8;
                bmp.set(x, y, Rgba::new(v, v.wrapping_add(85), v.wrapping_add(170), v));
            }
        }
        bmp
    }

    #[test]
    fn test_tier_mapping() {
        assert_eq!(Quality::from_tier(0), Quality::Fast);
        assert_eq!(Quality::from_tier(1), Quality::Balanced);
        assert_eq!(Quality::from_tier(2), Quality::Best);
        // The original tool treats any other value as "best".
        assert_eq!(Quality::from_tier(7), Quality::Best);
        assert_eq!(Quality::from_tier(-1), Quality::Best);
    }

    #[test]
    fn test_default_quality_is_best() {
        assert_eq!(Quality::default(), Quality::Best);
    }

    #[test]
    fn test_compressed_size_is_one_byte_per_pixel() {
        assert_eq!(Bc3Encoder::compressed_size(4, 4), 16);
        assert_eq!(Bc3Encoder::compressed_size(8, 8), 64);
        assert_eq!(Bc3Encoder::compressed_size(256, 128), 256 * 128);
    }

    #[test]
    fn test_payload_length_matches_dimensions() {
        let bmp = noise_bitmap(16, 8);
        for quality in [Quality::Fast, Quality::Balanced, Quality::Best] {
            let payload = Bc3Encoder::new(quality).compress_mip(&bmp);
            assert_eq!(payload.len(), 16 * 8);
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let bmp = noise_bitmap(16, 16);
        let encoder = Bc3Encoder::new(Quality::Best);
        assert_eq!(encoder.compress_mip(&bmp), encoder.compress_mip(&bmp));
    }

    #[test]
    fn test_solid_block_roundtrips_close() {
        let bmp = Bitmap::filled(4, 4, Rgba::new(128, 200, 64, 77));

        for quality in [Quality::Fast, Quality::Balanced, Quality::Best] {
            let payload = Bc3Encoder::new(quality).compress_mip(&bmp);

            let mut decoded: Bitmap<Rgba> = Bitmap::new(4, 4);
            decompress_mip(&payload, &mut decoded);

            for px in decoded.pixels() {
                assert!((i16::from(px.r) - 128).abs() <= 12, "r drifted: {}", px.r);
                assert!((i16::from(px.g) - 200).abs() <= 12, "g drifted: {}", px.g);
                assert!((i16::from(px.b) - 64).abs() <= 12, "b drifted: {}", px.b);
                // A uniform alpha plane is exactly representable.
                assert_eq!(px.a, 77);
            }
        }
    }

    #[test]
    fn test_reencoding_decoded_output_stays_close() {
        let bmp = noise_bitmap(8, 8);
        let encoder = Bc3Encoder::new(Quality::Best);

        let first = encoder.compress_mip(&bmp);
        let mut decoded: Bitmap<Rgba> = Bitmap::new(8, 8);
        decompress_mip(&first, &mut decoded);

        let second = encoder.compress_mip(&decoded);
        let mut redecoded: Bitmap<Rgba> = Bitmap::new(8, 8);
        decompress_mip(&second, &mut redecoded);

        for (a, b) in decoded.pixels().iter().zip(redecoded.pixels()) {
            assert!((i16::from(a.r) - i16::from(b.r)).abs() <= 16);
            assert!((i16::from(a.g) - i16::from(b.g)).abs() <= 16);
            assert!((i16::from(a.b) - i16::from(b.b)).abs() <= 16);
            assert!((i16::from(a.a) - i16::from(b.a)).abs() <= 8);
        }
    }
}
