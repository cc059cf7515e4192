//! # Claims Subcommand
//!
//! Lists the claim names of one representation, optionally narrowed to the
//! mandatory or deprecated ones.

use anyhow::Result;
use clap::Args;

use eupid::scheme::{claim_names_for, is_deprecated, is_required};
use vck_core::CredentialRepresentation;

/// Arguments for `eupid claims`.
#[derive(Args, Debug)]
pub struct ClaimsArgs {
    /// Representation whose naming to use (plain-jwt, sd-jwt, iso-mdoc).
    #[arg(long, short, default_value = "plain-jwt")]
    pub representation: CredentialRepresentation,

    /// Only list mandatory claims.
    #[arg(long)]
    pub required: bool,

    /// Only list deprecated claims.
    #[arg(long, conflicts_with = "required")]
    pub deprecated: bool,
}

/// Execute the claims subcommand.
pub fn run_claims(args: &ClaimsArgs) -> Result<u8> {
    for name in claim_listing(args.representation, args.required, args.deprecated) {
        let mut flags = Vec::new();
        if is_required(name) {
            flags.push("required");
        }
        if is_deprecated(name) {
            flags.push("deprecated");
        }
        if flags.is_empty() {
            println!("{name}");
        } else {
            println!("{name} ({})", flags.join(", "));
        }
    }
    Ok(0)
}

/// Claim names of `representation`, in rule book order.
pub fn claim_listing(
    representation: CredentialRepresentation,
    required: bool,
    deprecated: bool,
) -> Vec<&'static str> {
    claim_names_for(representation)
        .iter()
        .copied()
        .filter(|name| !required || is_required(name))
        .filter(|name| !deprecated || is_deprecated(name))
        .collect()
}
