//! # eupid-cli — EU PID Schema Tool
//!
//! Provides the `eupid` command-line interface for inspecting the EU PID
//! schema and checking claim sets against it.
//!
//! ## Subcommands
//!
//! - `eupid claims` — List claim names per representation.
//! - `eupid map` — Look up the SD-JWT path of an ISO/VC claim name.
//! - `eupid convert` — Convert a claim set between the flat and nested shapes.
//! - `eupid check` — Decode a VC or SD-JWT claim set and report deprecated claims.
//!
//! ```bash
//! eupid claims --representation sd-jwt --required
//! eupid map resident_street
//! eupid convert --to sd-jwt pid.yaml
//! eupid check --format vc credential.json
//! ```

pub mod check;
pub mod claims;
pub mod convert;
pub mod input;
pub mod map;
