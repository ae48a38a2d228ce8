//! bumpbake - bump/bump# texture baking for S.T.A.L.K.E.R.-era engines.
//!
//! Takes a tangent-space normal map plus optional gloss and height maps
//! and produces the two BC3-compressed DDS files those engines expect:
//! a "bump" texture holding the swizzled normal and gloss, and a "bump#"
//! texture holding the compression-error residual with height in alpha.
//!
//! # Example
//!
//! ```no_run
//! use bumpbake::dds::Quality;
//! use bumpbake::pipeline::{self, PipelineConfig};
//!
//! let config = PipelineConfig::new("rock_n.png")
//!     .with_gloss(Some("rock_gloss.png".into()))
//!     .with_quality(Quality::Best);
//!
//! let output = pipeline::run(&config)?;
//! println!("wrote {}", output.bump_path.display());
//! # Ok::<(), bumpbake::error::PipelineError>(())
//! ```

pub mod assemble;
pub mod bitmap;
pub mod dds;
pub mod error;
pub mod loader;
pub mod mipmap;
pub mod pipeline;
pub mod pixel;

/// Version of the bumpbake library and CLI, injected from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
