//! CLI command definitions.

use crate::styles::styles;
use clap::{Parser, Subcommand};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Release pipeline for prebuilt ppx binaries.
#[derive(Debug, Parser)]
#[command(
    name = "ppx-release",
    version,
    about = "Release pipeline steps for distributing prebuilt ppx binaries",
    styles = styles()
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per pipeline step; every step is one-shot and takes no
/// flags — the paths it touches are fixed by convention.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply the platform dependency pins to esy.json (CI build step).
    Patch,

    /// Derive the distributable package.json into the release staging
    /// directory (packaging step).
    Derive,

    /// Install the prebuilt binary for the host platform (install step).
    Postinstall,
}
