//! `ppx-release` is the release pipeline binary.

use clap::Parser;
use colored::Colorize;
use ppx_release::{Cli, Command, ReleaseError, ReleaseResult, handlers};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    // Initialize tracing - only enable when RUST_LOG is set.
    init_tracing();

    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

fn run() -> ReleaseResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Patch => handlers::handle_patch(),
        Command::Derive => handlers::handle_derive(),
        Command::Postinstall => handlers::handle_postinstall(),
    }
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &ReleaseError) {
    println!();
    match e {
        ReleaseError::UnsupportedPlatform(_) => {
            println!("  {} {}", "warning".bright_yellow().bold(), e);
        }
        _ => {
            println!("  {} {}", "error".bright_red().bold(), e);
        }
    }
    println!();
}

fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    // Without a subscriber, all tracing events are discarded.
    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
