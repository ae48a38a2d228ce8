//! Source image loading.
//!
//! Decoding is delegated to the `image` crate; this module only narrows
//! the result to the 8-bit layouts the pipeline accepts and converts to
//! the requested pixel type through the conversions in [`crate::pixel`].
//! Notably, collapsing color to mono uses this tool's `(2r + 5g + b) / 8`
//! luminance, not the decoder's own grayscale weights.

use std::path::Path;

use image::DynamicImage;

use crate::bitmap::Bitmap;
use crate::error::LoadError;
use crate::pixel::{Mono, Pixel, Rgb, Rgba};

/// Load an image file as a bitmap of the requested pixel type.
///
/// Accepts 8-bit gray, RGB and RGBA sources; anything else (16-bit,
/// gray+alpha, float) is an unsupported-layout error. The caller decides
/// whether that is fatal.
pub fn load_bitmap<T>(path: &Path) -> Result<Bitmap<T>, LoadError>
where
    T: Pixel + From<Mono> + From<Rgb> + From<Rgba>,
{
    let img = image::open(path).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let width = img.width();
    let height = img.height();

    match img {
        DynamicImage::ImageLuma8(buf) => Ok(convert_plane::<Mono, T>(width, height, buf.as_raw())),
        DynamicImage::ImageRgb8(buf) => Ok(convert_plane::<Rgb, T>(width, height, buf.as_raw())),
        DynamicImage::ImageRgba8(buf) => Ok(convert_plane::<Rgba, T>(width, height, buf.as_raw())),
        other => Err(LoadError::UnsupportedLayout {
            path: path.to_path_buf(),
            color: other.color(),
        }),
    }
}

/// Reinterpret an interleaved plane of `S` pixels as a bitmap of `T`.
fn convert_plane<S, T>(width: u32, height: u32, raw: &[u8]) -> Bitmap<T>
where
    S: Pixel + Into<T>,
    T: Pixel,
{
    let pixels = raw
        .chunks_exact(S::CHANNELS)
        .map(|c| S::from_channels(c).into())
        .collect();
    Bitmap::from_pixels(width, height, pixels)
}
