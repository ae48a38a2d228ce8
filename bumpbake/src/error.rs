//! Error types for the baking pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a source image could not be turned into a bitmap.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read or decoded as an image.
    #[error("could not decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The image decoded to a pixel layout the pipeline does not accept.
    #[error(
        "'{}' has unsupported pixel layout {color:?}; expected 8-bit gray, RGB or RGBA",
        path.display()
    )]
    UnsupportedLayout {
        path: PathBuf,
        color: image::ColorType,
    },
}

/// Fatal pipeline failures.
///
/// Gloss and height degradation is deliberately absent here: a missing or
/// mismatched auxiliary map is recovered locally (with a warning), never
/// surfaced as an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The normal map path does not exist or is not a regular file.
    #[error("normal map '{}' does not exist or is not a regular file", path.display())]
    InputMissing { path: PathBuf },

    /// The normal map exists but is not a decodable image.
    #[error("failed to load normal map: {0}")]
    InputInvalid(#[source] LoadError),

    /// The normal map's dimensions cannot feed a block-compressed pyramid.
    #[error("normal map is {width}×{height}; both dimensions must be powers of two, at least 4")]
    InvalidDimensions { width: u32, height: u32 },

    /// A DDS output file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    OutputFailure { path: PathBuf, source: io::Error },
}
