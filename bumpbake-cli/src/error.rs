//! CLI error handling with user-facing messages and exit codes.

use std::fmt;
use std::process;

use bumpbake::error::PipelineError;

use crate::args::ArgError;

/// Everything that can abort a CLI invocation.
#[derive(Debug)]
pub enum CliError {
    /// The command line could not be understood.
    Usage(ArgError),
    /// The bake itself failed.
    Pipeline(PipelineError),
}

impl CliError {
    /// Print the error (plus usage, when the command line was at fault)
    /// and terminate with a non-zero status.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {self}");
        if let CliError::Usage(_) = self {
            eprintln!();
            crate::print_usage();
        }
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(e) => write!(f, "{e}"),
            CliError::Pipeline(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Usage(_) => None,
            CliError::Pipeline(e) => Some(e),
        }
    }
}

impl From<ArgError> for CliError {
    fn from(e: ArgError) -> Self {
        CliError::Usage(e)
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}
