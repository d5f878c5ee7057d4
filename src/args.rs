pub mod types;
pub mod validation;

use clap::Parser;

pub use types::{Args, CleanArgs};

use crate::error::ScoringError;

/// Parse the command line and load every snapshot file it names.
///
/// # Errors
///
/// Will return `Err` if a snapshot file is not a valid competition snapshot
pub fn args_checks() -> Result<CleanArgs, ScoringError> {
    let args = Args::parse();
    CleanArgs::try_from(args)
}
