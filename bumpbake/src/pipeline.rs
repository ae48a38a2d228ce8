//! The baking pipeline: validate inputs, build pyramids, assemble and
//! compress both textures, write the DDS pair.
//!
//! Only the normal map is load-bearing. Gloss and height maps degrade
//! gracefully: a missing, unreadable or size-mismatched gloss map is
//! dropped (the bump red channel then carries the normal map's red byte),
//! and a missing height map is replaced by a neutral constant.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::assemble::{assemble_bump, assemble_residual};
use crate::bitmap::{Bitmap, Texture, MIN_MIP_SIZE};
use crate::dds::{self, Bc3Encoder, Quality};
use crate::error::PipelineError;
use crate::loader::load_bitmap;
use crate::mipmap::MipmapGenerator;
use crate::pixel::{Mono, Pixel, Rgba};

/// Height value used when no height map is available.
const NEUTRAL_HEIGHT: u8 = 128;

/// Everything a bake run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    normal_path: PathBuf,
    gloss_path: Option<PathBuf>,
    height_path: Option<PathBuf>,
    output_stem: Option<PathBuf>,
    linear_gloss: bool,
    quality: Quality,
}

impl PipelineConfig {
    /// Configuration with only the required normal map; gloss and height
    /// omitted, output stem derived from the normal map, log-space gloss,
    /// best-quality compression.
    pub fn new(normal_path: impl Into<PathBuf>) -> Self {
        Self {
            normal_path: normal_path.into(),
            gloss_path: None,
            height_path: None,
            output_stem: None,
            linear_gloss: false,
            quality: Quality::default(),
        }
    }

    pub fn with_gloss(mut self, path: Option<PathBuf>) -> Self {
        self.gloss_path = path;
        self
    }

    pub fn with_height(mut self, path: Option<PathBuf>) -> Self {
        self.height_path = path;
        self
    }

    /// Override the output stem. `None` derives it from the normal map's
    /// path minus extension; a stem naming an existing directory gets the
    /// normal map's file stem appended.
    pub fn with_output_stem(mut self, stem: Option<PathBuf>) -> Self {
        self.output_stem = stem;
        self
    }

    /// Store gloss linearly instead of on the square-root curve.
    pub fn with_linear_gloss(mut self, linear: bool) -> Self {
        self.linear_gloss = linear;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }
}

/// What a successful bake produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeOutput {
    pub bump_path: PathBuf,
    pub bump_sharp_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub mip_count: usize,
}

/// Run the full pipeline.
pub fn run(config: &PipelineConfig) -> Result<BakeOutput, PipelineError> {
    let normal = load_normal(&config.normal_path)?;
    let width = normal.width();
    let height = normal.height();

    let gloss = config
        .gloss_path
        .as_deref()
        .and_then(|p| load_auxiliary(p, width, height, "gloss"));

    let height_map = config
        .height_path
        .as_deref()
        .and_then(|p| load_auxiliary(p, width, height, "height"))
        .unwrap_or_else(|| {
            info!("using neutral height ({NEUTRAL_HEIGHT})");
            Bitmap::filled(width, height, Mono::new(NEUTRAL_HEIGHT))
        });

    info!("building mip chains for {width}×{height} inputs");
    let mut normal_tex = build_pyramid(normal, true);
    info!("normal map: {} mip levels", normal_tex.level_count());

    let gloss_tex = gloss.map(|bmp| build_pyramid(bmp, false));
    let height_tex = build_pyramid(height_map, false);

    info!("assembling bump channels (A = Nx, B = Ny, G = Nz, R = gloss)");
    assemble_bump(&mut normal_tex, gloss_tex.as_ref(), config.linear_gloss);

    let encoder = Bc3Encoder::new(config.quality);
    info!("compressing with {:?} tier", config.quality);
    let bump_mips = compress_pyramid(&encoder, &normal_tex, "bump");

    // bump#: decode what was just compressed, diff against the assembled
    // source, carry height in alpha, compress again.
    let mut residual_tex: Texture<Rgba> = Texture::new(width, height);
    for level in 0..normal_tex.level_count() {
        let scratch = residual_tex.mip_mut(level);
        dds::decompress_mip(&bump_mips[level], scratch);
        assemble_residual(normal_tex.mip(level), scratch, height_tex.mip(level));
    }
    let sharp_mips = compress_pyramid(&encoder, &residual_tex, "bump#");

    let stem = resolve_output_stem(config);
    let bump_path = with_suffix(&stem, "_bump.dds");
    let bump_sharp_path = with_suffix(&stem, "_bump#.dds");

    write_output(&bump_path, width, height, &bump_mips)?;
    write_output(&bump_sharp_path, width, height, &sharp_mips)?;

    Ok(BakeOutput {
        bump_path,
        bump_sharp_path,
        width,
        height,
        mip_count: normal_tex.level_count(),
    })
}

fn is_power_of_two(v: u32) -> bool {
    v != 0 && v & (v - 1) == 0
}

/// Load and validate the normal map.
fn load_normal(path: &Path) -> Result<Bitmap<Rgba>, PipelineError> {
    let missing = || PipelineError::InputMissing {
        path: path.to_path_buf(),
    };
    if !fs::metadata(path).map(|m| m.is_file()).unwrap_or(false) {
        return Err(missing());
    }

    let bmp: Bitmap<Rgba> = load_bitmap(path).map_err(PipelineError::InputInvalid)?;

    let (w, h) = (bmp.width(), bmp.height());
    if !is_power_of_two(w) || !is_power_of_two(h) || w < MIN_MIP_SIZE || h < MIN_MIP_SIZE {
        return Err(PipelineError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    Ok(bmp)
}

/// Load a gloss or height map, dropping it (with a warning) on any failure
/// or dimension mismatch.
fn load_auxiliary(path: &Path, width: u32, height: u32, kind: &str) -> Option<Bitmap<Mono>> {
    match load_bitmap::<Mono>(path) {
        Ok(bmp) if bmp.width() == width && bmp.height() == height => Some(bmp),
        Ok(bmp) => {
            warn!(
                "{kind} map '{}' is {}×{} but the normal map is {width}×{height}; ignoring it",
                path.display(),
                bmp.width(),
                bmp.height(),
            );
            None
        }
        Err(err) => {
            warn!("could not load {kind} map: {err}; ignoring it");
            None
        }
    }
}

/// Allocate a pyramid, seat `mip0`, fill the remaining levels.
fn build_pyramid<T: Pixel>(mip0: Bitmap<T>, normalize: bool) -> Texture<T> {
    let mut texture = Texture::new(mip0.width(), mip0.height());
    *texture.mip_mut(0) = mip0;
    MipmapGenerator::build_chain(&mut texture, normalize);
    texture
}

/// Compress every level of a pyramid, coarsest last.
fn compress_pyramid(encoder: &Bc3Encoder, texture: &Texture<Rgba>, label: &str) -> Vec<Vec<u8>> {
    texture
        .mips()
        .iter()
        .enumerate()
        .map(|(level, mip)| {
            let payload = encoder.compress_mip(mip);
            info!(
                "compressed {label} mip {level}: {} bytes to {} bytes",
                mip.pixels().len() * Rgba::CHANNELS,
                payload.len(),
            );
            payload
        })
        .collect()
}

fn resolve_output_stem(config: &PipelineConfig) -> PathBuf {
    match &config.output_stem {
        None => config.normal_path.with_extension(""),
        Some(stem) if stem.is_dir() => {
            info!("output names a directory; using the normal map's name");
            stem.join(config.normal_path.file_stem().unwrap_or(OsStr::new("bump")))
        }
        Some(stem) => stem.clone(),
    }
}

/// Append a suffix to a path without treating it as an extension.
fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_output(
    path: &Path,
    width: u32,
    height: u32,
    mips: &[Vec<u8>],
) -> Result<(), PipelineError> {
    dds::write_file(path, width, height, mips).map_err(|source| PipelineError::OutputFailure {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(4));
        assert!(is_power_of_two(1024));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(100));
        assert!(!is_power_of_two(6));
    }

    #[test]
    fn test_with_suffix_keeps_dots_in_stem() {
        let path = with_suffix(Path::new("tex/rock.v2"), "_bump.dds");
        assert_eq!(path, Path::new("tex/rock.v2_bump.dds"));
    }

    #[test]
    fn test_output_stem_defaults_to_normal_path() {
        let config = PipelineConfig::new("textures/rock_n.png");
        assert_eq!(
            resolve_output_stem(&config),
            Path::new("textures/rock_n")
        );
    }

    #[test]
    fn test_output_stem_explicit() {
        let config =
            PipelineConfig::new("rock_n.png").with_output_stem(Some(PathBuf::from("out/rock")));
        assert_eq!(resolve_output_stem(&config), Path::new("out/rock"));
    }

    #[test]
    fn test_output_stem_directory_appends_source_name() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig::new("textures/rock_n.png")
            .with_output_stem(Some(dir.path().to_path_buf()));

        assert_eq!(resolve_output_stem(&config), dir.path().join("rock_n"));
    }

    #[test]
    fn test_missing_normal_map_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig::new(dir.path().join("absent.png"));

        match run(&config) {
            Err(PipelineError::InputMissing { .. }) => {}
            other => panic!("expected InputMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_auxiliary_size_mismatch_is_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("g.png");
        image::GrayImage::from_pixel(4, 4, image::Luma([9]))
            .save(&path)
            .unwrap();

        assert!(load_auxiliary(&path, 8, 8, "gloss").is_none());
        assert!(load_auxiliary(&path, 4, 4, "gloss").is_some());
    }
}
