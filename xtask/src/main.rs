//! label-wand quality checks.
//!
//! Every check the workspace enforces runs through this one entry point.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run all quality checks
//! - `cargo xtask ci` - Full CI suite
//!
//! # Standard
//!
//! 1. Formatting - `cargo fmt` clean
//! 2. Clippy - Zero warnings, pedantic included
//! 3. Tests - Unit, integration and property tests pass
//! 4. Documentation - Zero rustdoc warnings
//! 5. Safety - Zero unwrap/expect in library code

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// label-wand quality checks
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Quality checks for label-wand", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Exit non-zero if any check fails
        #[arg(long)]
        ci: bool,
    },

    /// Run the full CI suite
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run_ci(),
    }
}
