//! # Map Subcommand
//!
//! Looks up the SD-JWT claim path of an ISO/VC claim name, or with
//! `--reverse` the ISO/VC names behind an SD-JWT path.

use anyhow::{bail, Result};
use clap::Args;

use eupid::mapping::{iso_names_for, sd_jwt_name_for, UNMAPPED_CLAIM_NAMES};
use eupid::scheme::{CLAIM_NAMES, SD_JWT_CLAIM_NAMES};

/// Arguments for `eupid map`.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Claim name to look up.
    pub name: String,

    /// Treat the name as an SD-JWT path and list the ISO/VC names.
    #[arg(long)]
    pub reverse: bool,
}

/// Execute the map subcommand.
pub fn run_map(args: &MapArgs) -> Result<u8> {
    let line = if args.reverse {
        describe_reverse(&args.name)?
    } else {
        describe_mapping(&args.name)?
    };
    println!("{line}");
    Ok(0)
}

/// One-line description of where an ISO/VC claim goes in SD-JWT.
pub fn describe_mapping(name: &str) -> Result<String> {
    if !CLAIM_NAMES.contains(&name) {
        bail!("unknown EU PID claim: '{name}'");
    }
    Ok(match sd_jwt_name_for(name) {
        Some(path) => format!("{name} -> {path}"),
        None if UNMAPPED_CLAIM_NAMES.contains(&name) => format!("{name}: no mapping (ISO/VC only)"),
        None => format!("{name}: no mapping"),
    })
}

/// One-line description of the ISO/VC claims behind an SD-JWT path.
pub fn describe_reverse(path: &str) -> Result<String> {
    if !SD_JWT_CLAIM_NAMES.contains(&path) {
        bail!("unknown EU PID SD-JWT claim: '{path}'");
    }
    let names = iso_names_for(path);
    Ok(if names.is_empty() {
        format!("{path}: no mapping")
    } else {
        format!("{path} <- {}", names.join(", "))
    })
}
