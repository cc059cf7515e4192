//! # Check Subcommand
//!
//! Decodes a credential document as an EU PID and reports deprecated
//! claims. A VC document must carry an `EuPid2023` credential subject; an
//! SD-JWT document is a nested claim set before redaction.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value as JsonValue;

use eupid::scheme::VC_TYPE;
use eupid::{init_with_vck, EuPidCredential, EuPidCredentialSdJwt};
use vck_core::VerifiableCredential;

use crate::input::load_document;

/// Document format to check.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// W3C VC with an EU PID credential subject.
    Vc,
    /// SD-JWT claim set.
    SdJwt,
}

/// Arguments for `eupid check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Document format.
    #[arg(long, value_enum, default_value = "vc")]
    pub format: Format,

    /// Document to check (JSON, or YAML by extension).
    pub file: PathBuf,
}

/// Outcome of a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Holder name as `given family`.
    pub holder: String,
    /// Deprecated claims the document populates.
    pub deprecated: Vec<&'static str>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let document = load_document(&args.file)?;
    let report = check_document(args.format, document)
        .with_context(|| format!("checking {}", args.file.display()))?;
    for claim in &report.deprecated {
        tracing::warn!(claim, "deprecated claim in use");
    }
    println!("  EU PID: VALID");
    println!("  holder: {}", report.holder);
    if !report.deprecated.is_empty() {
        println!("  deprecated claims: {}", report.deprecated.join(", "));
    }
    Ok(0)
}

/// Decode `document` in `format` as an EU PID.
pub fn check_document(format: Format, document: JsonValue) -> Result<CheckReport> {
    match format {
        Format::Vc => {
            init_with_vck()?;
            let vc: VerifiableCredential =
                serde_json::from_value(document).context("decoding VC envelope")?;
            match vc.subject_type() {
                Some(VC_TYPE) => {}
                Some(other) => bail!("credential subject type '{other}' is not {VC_TYPE}"),
                None => bail!("credential subject has no type"),
            }
            let subject = vc.subject()?;
            let pid = subject
                .downcast_ref::<EuPidCredential>()
                .context("credential subject did not decode as an EU PID")?;
            Ok(CheckReport {
                holder: format!("{} {}", pid.given_name, pid.family_name),
                deprecated: pid.deprecated_claims_in_use(),
            })
        }
        Format::SdJwt => {
            let JsonValue::Object(claims) = document else {
                bail!("SD-JWT claim set must be an object");
            };
            let pid = EuPidCredentialSdJwt::from_claims(&claims)?;
            Ok(CheckReport {
                holder: format!("{} {}", pid.given_name, pid.family_name),
                deprecated: pid.deprecated_claims_in_use(),
            })
        }
    }
}
