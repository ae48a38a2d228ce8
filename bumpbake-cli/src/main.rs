//! bumpbake CLI - bakes bump/bump# DDS texture pairs.
//!
//! The flag surface is kept compatible with the tool modders already
//! script against: `-n:` (normal map, required), `-g:` (gloss), `-h:`
//! (height), `-o:` (output stem), `-l:g` (linear gloss), `-q:{0,1,2}`
//! (quality tier, default 2), `-help`.

mod args;
mod error;

use args::{CliArgs, Parsed};
use bumpbake::pipeline::{self, PipelineConfig};
use error::CliError;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&argv) {
        e.exit();
    }
}

fn run(argv: &[String]) -> Result<(), CliError> {
    match args::parse(argv)? {
        Parsed::Help => {
            print_usage();
            Ok(())
        }
        Parsed::Run(args) => bake(args),
    }
}

fn bake(args: CliArgs) -> Result<(), CliError> {
    println!("bumpbake v{}", bumpbake::VERSION);
    println!("Quality tier: {:?}", args.quality);
    info!("normal map: {}", args.normal.display());

    let config = PipelineConfig::new(args.normal)
        .with_gloss(args.gloss)
        .with_height(args.height)
        .with_output_stem(args.output)
        .with_linear_gloss(args.linear_gloss)
        .with_quality(args.quality);

    let output = pipeline::run(&config)?;

    println!(
        "Baked {}×{} with {} mip levels",
        output.width, output.height, output.mip_count
    );
    println!("  {}", output.bump_path.display());
    println!("  {}", output.bump_sharp_path.display());

    Ok(())
}

fn print_usage() {
    println!("Usage: bumpbake -n:normalmap [-g:glossmap] [-h:heightmap] [-l:g] [-q:quality] [-o:output]");
    println!();
    println!("  -n:path   tangent-space normal map (required, power-of-two)");
    println!("  -g:path   gloss map; omitted or mismatched maps are skipped");
    println!("  -h:path   height map; a neutral height is used when absent");
    println!("  -o:path   output stem; defaults to the normal map's path minus extension");
    println!("  -l:g      store gloss linearly instead of on the log curve");
    println!("  -q:N      0 = fast, 1 = balanced, 2 = best quality (default)");
    println!();
    println!("Outputs <stem>_bump.dds and <stem>_bump#.dds.");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
