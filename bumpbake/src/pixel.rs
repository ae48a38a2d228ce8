//! Typed 8-bit pixel records and the conversions between them.
//!
//! Three layouts cover every raster this tool touches:
//!
//! - [`Mono`] - one channel (gloss and height maps)
//! - [`Rgb`] - three channels (opaque source images)
//! - [`Rgba`] - four channels (normal maps and everything headed for BC3)
//!
//! Conversions are defined for the six layout pairs via `From` impls.
//! Collapsing color to mono uses the integer luminance approximation
//! `(2r + 5g + b) / 8` rather than the exact 0.299/0.587/0.114 weights.

/// Access to a pixel's channel count and raw interleaved form.
///
/// The mip resampler and the image loader move pixels through flat
/// `u8` planes; this trait is the bridge between those planes and the
/// typed records.
pub trait Pixel: Copy + Default + 'static {
    /// Number of 8-bit channels in this layout.
    const CHANNELS: usize;

    /// Read a pixel from `raw`, which must hold at least `CHANNELS` bytes.
    fn from_channels(raw: &[u8]) -> Self;

    /// Write this pixel's channels into `out`, which must hold at least
    /// `CHANNELS` bytes.
    fn write_channels(&self, out: &mut [u8]);
}

/// Single-channel pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mono {
    pub r: u8,
}

/// Three-channel pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Four-channel pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Mono {
    pub fn new(r: u8) -> Self {
        Self { r }
    }
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for Mono {
    const CHANNELS: usize = 1;

    fn from_channels(raw: &[u8]) -> Self {
        Self { r: raw[0] }
    }

    fn write_channels(&self, out: &mut [u8]) {
        out[0] = self.r;
    }
}

impl Pixel for Rgb {
    const CHANNELS: usize = 3;

    fn from_channels(raw: &[u8]) -> Self {
        Self {
            r: raw[0],
            g: raw[1],
            b: raw[2],
        }
    }

    fn write_channels(&self, out: &mut [u8]) {
        out[0] = self.r;
        out[1] = self.g;
        out[2] = self.b;
    }
}

impl Pixel for Rgba {
    const CHANNELS: usize = 4;

    fn from_channels(raw: &[u8]) -> Self {
        Self {
            r: raw[0],
            g: raw[1],
            b: raw[2],
            a: raw[3],
        }
    }

    fn write_channels(&self, out: &mut [u8]) {
        out[0] = self.r;
        out[1] = self.g;
        out[2] = self.b;
        out[3] = self.a;
    }
}

/// Integer luminance: `(2r + 5g + b) / 8`, truncating.
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let l = 2 * u16::from(r) + 5 * u16::from(g) + u16::from(b);
    (l >> 3) as u8
}

impl From<Rgb> for Mono {
    fn from(src: Rgb) -> Self {
        Self {
            r: luminance(src.r, src.g, src.b),
        }
    }
}

impl From<Rgba> for Mono {
    fn from(src: Rgba) -> Self {
        Self {
            r: luminance(src.r, src.g, src.b),
        }
    }
}

impl From<Mono> for Rgb {
    fn from(src: Mono) -> Self {
        Self {
            r: src.r,
            g: src.r,
            b: src.r,
        }
    }
}

impl From<Mono> for Rgba {
    fn from(src: Mono) -> Self {
        Self {
            r: src.r,
            g: src.r,
            b: src.r,
            a: 0xFF,
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(src: Rgb) -> Self {
        Self {
            r: src.r,
            g: src.g,
            b: src.b,
            a: 0xFF,
        }
    }
}

impl From<Rgba> for Rgb {
    fn from(src: Rgba) -> Self {
        Self {
            r: src.r,
            g: src.g,
            b: src.b,
        }
    }
}
