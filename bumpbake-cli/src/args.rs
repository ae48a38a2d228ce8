//! Argument parsing for the `-X:VALUE` flag surface.
//!
//! The flag syntax is a compatibility contract with the tool this one
//! replaces in modding workflows: every option is a single dash, a single
//! letter, a colon, and a value (`-n:rock_n.png`, `-q:2`, `-l:g`).
//! Unknown or malformed parameters are reported and skipped; a repeated
//! flag keeps its first value.

use std::fmt;
use std::path::PathBuf;

use bumpbake::dds::Quality;

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub normal: PathBuf,
    pub gloss: Option<PathBuf>,
    pub height: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub linear_gloss: bool,
    pub quality: Quality,
}

/// Outcome of parsing: either a run request or a help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Help,
    Run(CliArgs),
}

/// Command lines that cannot be turned into a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// No `-n:` flag was given; there is nothing to bake.
    MissingNormal,
    /// The `-q:` value is not an integer.
    InvalidQuality(String),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::MissingNormal => write!(f, "no normal map provided (use -n:path)"),
            ArgError::InvalidQuality(v) => {
                write!(f, "quality must be an integer, got '{v}'")
            }
        }
    }
}

/// Parse the arguments following the program name.
pub fn parse(args: &[String]) -> Result<Parsed, ArgError> {
    if args.is_empty() || args[0] == "-help" {
        return Ok(Parsed::Help);
    }

    let mut normal: Option<PathBuf> = None;
    let mut gloss: Option<PathBuf> = None;
    let mut height: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut linear: Option<String> = None;
    let mut quality: Option<String> = None;

    for arg in args {
        let Some((key, value)) = split_flag(arg) else {
            eprintln!("Unknown param \"{arg}\"");
            continue;
        };

        let slot: &mut Option<_> = match key {
            'n' => &mut normal,
            'g' => &mut gloss,
            'h' => &mut height,
            'o' => &mut output,
            'l' => {
                store_first(&mut linear, arg, value.to_string());
                continue;
            }
            'q' => {
                store_first(&mut quality, arg, value.to_string());
                continue;
            }
            _ => {
                eprintln!("Unknown param \"{arg}\"");
                continue;
            }
        };
        store_first(slot, arg, PathBuf::from(value));
    }

    let normal = normal.ok_or(ArgError::MissingNormal)?;

    // The flag only takes effect as `-l:g`.
    let linear_gloss = linear.map(|v| v.starts_with('g')).unwrap_or(false);

    let quality = match quality {
        None => Quality::default(),
        Some(v) => {
            let tier: i64 = v.parse().map_err(|_| ArgError::InvalidQuality(v))?;
            Quality::from_tier(tier)
        }
    };

    Ok(Parsed::Run(CliArgs {
        normal,
        gloss,
        height,
        output,
        linear_gloss,
        quality,
    }))
}

/// Split `-X:VALUE` into its key letter and non-empty value.
fn split_flag(arg: &str) -> Option<(char, &str)> {
    let rest = arg.strip_prefix('-')?;
    let mut chars = rest.chars();
    let key = chars.next()?;
    let value = chars.as_str().strip_prefix(':')?;
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn store_first<T>(slot: &mut Option<T>, arg: &str, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    } else {
        eprintln!("Unknown param \"{arg}\"");
    }
}
