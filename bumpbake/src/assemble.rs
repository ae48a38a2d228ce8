//! Channel assembly for the bump and bump# textures.
//!
//! The bump layout packs the normal into the channels BC3 treats best:
//! alpha gets Nx (near-lossless), green gets Nz (6-bit endpoints), blue
//! gets Ny, and red carries gloss. The shader reconstructs Nz from Nx/Ny,
//! so the lowest-precision slot is acceptable for it.
//!
//! The bump# layout carries the compression residual of the bump texture
//! in RGB (amplified ×2 and biased to 128) and the height map in alpha.

use crate::bitmap::{Bitmap, Texture};
use crate::pixel::{Mono, Rgba};

/// Gloss curve: `round(sqrt(g / 255) · 255)`.
///
/// The target engines store gloss on a square-root curve to gain low-end
/// precision and re-linearize in the shader.
pub fn gloss_to_log(g: u8) -> u8 {
    ((f32::from(g) / 255.0).sqrt() * 255.0).round() as u8
}

/// Rewrite every normal-map mip in place into the bump channel layout.
///
/// With a gloss pyramid present, red takes the (optionally curved) gloss
/// value; without one, red keeps the normal map's own red byte, un-curved.
pub fn assemble_bump(normal: &mut Texture<Rgba>, gloss: Option<&Texture<Mono>>, linear_gloss: bool) {
    for (level, mip) in normal.mips_mut().iter_mut().enumerate() {
        match gloss {
            Some(gloss) => {
                let gloss_mip = gloss.mip(level);
                for (np, gp) in mip.pixels_mut().iter_mut().zip(gloss_mip.pixels()) {
                    let red = if linear_gloss {
                        gp.r
                    } else {
                        gloss_to_log(gp.r)
                    };
                    *np = Rgba::new(red, np.b, np.g, np.r);
                }
            }
            None => {
                for np in mip.pixels_mut() {
                    *np = Rgba::new(np.r, np.b, np.g, np.r);
                }
            }
        }
    }
}

/// Residual channel: `(source − decoded) · 2 + 128`, saturating.
fn residual(source: u8, decoded: u8) -> u8 {
    ((i32::from(source) - i32::from(decoded)) * 2 + 128).clamp(0, 255) as u8
}

/// Turn a decoded bump mip into a bump# mip, in place.
///
/// On entry `scratch` holds the BC3 reconstruction of `assembled`; on
/// exit it holds the per-channel residual un-swizzled back to normal-map
/// order (R = Nx error, G = Ny error, B = Nz error) with the height mip's
/// red channel in alpha. The gloss channel's error is discarded.
pub fn assemble_residual(
    assembled: &Bitmap<Rgba>,
    scratch: &mut Bitmap<Rgba>,
    height: &Bitmap<Mono>,
) {
    debug_assert_eq!(assembled.width(), scratch.width());
    debug_assert_eq!(assembled.height(), scratch.height());
    debug_assert_eq!(assembled.width(), height.width());
    debug_assert_eq!(assembled.height(), height.height());

    for ((np, dp), hp) in assembled
        .pixels()
        .iter()
        .zip(scratch.pixels_mut())
        .zip(height.pixels())
    {
        *dp = Rgba::new(
            residual(np.a, dp.a),
            residual(np.b, dp.b),
            residual(np.g, dp.g),
            hp.r,
        );
    }
}
