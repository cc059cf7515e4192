//! # Convert Subcommand
//!
//! Converts a claim set between the flat ISO/VC shape and the nested
//! SD-JWT shape and prints the result as JSON. Claims without a
//! counterpart are dropped; run with `-vv` to see which.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::{Map, Value as JsonValue};

use eupid::mapping::{iso_claims_to_sd_jwt, sd_jwt_claims_to_iso};

use crate::input::load_claims;

/// Target shape of a conversion.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Nested SD-JWT claim set, from a flat ISO/VC claim set.
    SdJwt,
    /// Flat ISO/VC claim set, from a nested SD-JWT claim set.
    Iso,
}

/// Arguments for `eupid convert`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Target shape.
    #[arg(long, value_enum)]
    pub to: Target,

    /// Claim set to convert (JSON, or YAML by extension).
    pub file: PathBuf,
}

/// Execute the convert subcommand.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let claims = load_claims(&args.file)?;
    let converted = convert_claims(args.to, &claims);
    let dropped = claims.len().saturating_sub(converted_claim_count(args.to, &converted));
    if dropped > 0 {
        tracing::info!(dropped, "claims without a counterpart were dropped");
    }
    println!("{}", serde_json::to_string_pretty(&JsonValue::Object(converted))?);
    Ok(0)
}

/// Convert `claims` into the `target` shape.
pub fn convert_claims(target: Target, claims: &Map<String, JsonValue>) -> Map<String, JsonValue> {
    match target {
        Target::SdJwt => iso_claims_to_sd_jwt(claims),
        Target::Iso => sd_jwt_claims_to_iso(claims),
    }
}

/// Number of source claims represented in a converted set.
fn converted_claim_count(target: Target, converted: &Map<String, JsonValue>) -> usize {
    match target {
        // Nested objects hold several source claims each.
        Target::SdJwt => converted
            .values()
            .map(|v| match v {
                JsonValue::Object(members) => members.len(),
                _ => 1,
            })
            .sum(),
        Target::Iso => converted.len(),
    }
}
