//! # eupid CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eupid_cli::check::{run_check, CheckArgs};
use eupid_cli::claims::{run_claims, ClaimsArgs};
use eupid_cli::convert::{run_convert, ConvertArgs};
use eupid_cli::map::{run_map, MapArgs};

/// EU PID schema tool.
///
/// Lists claim names per representation, maps ISO/VC names to SD-JWT paths,
/// converts claim sets between the two shapes, and checks credential
/// documents against the EU PID schema.
#[derive(Parser, Debug)]
#[command(name = "eupid", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List claim names of a representation.
    Claims(ClaimsArgs),

    /// Look up the SD-JWT path of an ISO/VC claim name.
    Map(MapArgs),

    /// Convert a claim set between the ISO/VC and SD-JWT shapes.
    Convert(ConvertArgs),

    /// Decode a VC or SD-JWT document and report deprecated claims.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Claims(args) => run_claims(&args),
        Commands::Map(args) => run_map(&args),
        Commands::Convert(args) => run_convert(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
