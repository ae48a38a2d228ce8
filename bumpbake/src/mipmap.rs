//! Mip chain construction.
//!
//! Downsampling runs through `image::imageops::resize` with the Lanczos3
//! windowed-sinc filter. Normal-map chains additionally re-normalize each
//! downsampled pixel back onto the unit sphere, since filtering shortens
//! averaged normals.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage, RgbaImage};

use crate::bitmap::{Bitmap, Texture};
use crate::pixel::Pixel;

/// How many levels the chain builder steps back up when picking the source
/// for the next mip. Levels 1..=3 are filtered straight from level 0;
/// deeper levels reuse the pyramid three steps above to bound the cost of
/// repeated wide filters without compounding losses every generation.
pub const MIP_SOURCE_STEP: usize = 3;

/// Mip chain generator.
pub struct MipmapGenerator;

impl MipmapGenerator {
    /// Populate levels `1..N` of a pyramid whose level 0 is already assigned.
    ///
    /// When `normalize` is set and the pixel layout carries RGB, every
    /// generated pixel is re-normalized as a packed unit vector.
    pub fn build_chain<T: Pixel>(texture: &mut Texture<T>, normalize: bool) {
        for level in 1..texture.level_count() {
            let src_level = level.saturating_sub(MIP_SOURCE_STEP);
            let (upper, rest) = texture.mips_mut().split_at_mut(level);
            Self::make_mip(&upper[src_level], &mut rest[0], normalize);
        }
    }

    /// Downsample `src` into `dst`, optionally re-normalizing.
    pub fn make_mip<T: Pixel>(src: &Bitmap<T>, dst: &mut Bitmap<T>, normalize: bool) {
        let mut raw = resize_plane(
            &src.to_raw(),
            T::CHANNELS,
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        );

        if normalize && T::CHANNELS >= 3 {
            renormalize_plane(&mut raw, T::CHANNELS);
        }

        *dst = Bitmap::from_raw(dst.width(), dst.height(), &raw);
    }
}

/// Resample an interleaved channel plane to new dimensions.
fn resize_plane(
    raw: &[u8],
    channels: usize,
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
) -> Vec<u8> {
    match channels {
        1 => {
            let img = GrayImage::from_raw(src_w, src_h, raw.to_vec())
                .expect("plane length matches dimensions");
            imageops::resize(&img, dst_w, dst_h, FilterType::Lanczos3).into_raw()
        }
        3 => {
            let img = RgbImage::from_raw(src_w, src_h, raw.to_vec())
                .expect("plane length matches dimensions");
            imageops::resize(&img, dst_w, dst_h, FilterType::Lanczos3).into_raw()
        }
        4 => {
            let img = RgbaImage::from_raw(src_w, src_h, raw.to_vec())
                .expect("plane length matches dimensions");
            imageops::resize(&img, dst_w, dst_h, FilterType::Lanczos3).into_raw()
        }
        n => unreachable!("unsupported channel count {n}"),
    }
}

/// Treat the first three channels of each pixel as a packed unit vector in
/// `[-1, 1]^3`, rescale to unit length, and repack. Remaining channels
/// (alpha) are untouched.
fn renormalize_plane(raw: &mut [u8], channels: usize) {
    for px in raw.chunks_exact_mut(channels) {
        let mut x = f32::from(px[0]) / 255.0 * 2.0 - 1.0;
        let mut y = f32::from(px[1]) / 255.0 * 2.0 - 1.0;
        let mut z = f32::from(px[2]) / 255.0 * 2.0 - 1.0;

        let inv_len = 1.0 / (x * x + y * y + z * z).sqrt();
        x *= inv_len;
        y *= inv_len;
        z *= inv_len;

        px[0] = ((x * 0.5 + 0.5) * 255.0).clamp(0.0, 255.0) as u8;
        px[1] = ((y * 0.5 + 0.5) * 255.0).clamp(0.0, 255.0) as u8;
        px[2] = ((z * 0.5 + 0.5) * 255.0).clamp(0.0, 255.0) as u8;
    }
}
