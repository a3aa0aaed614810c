//! Pipeline step handlers.
//!
//! Each handler is the outermost boundary of one step: it reads the host
//! environment (platform, working directory, executable location) exactly
//! once and hands plain values to the core modules.

use crate::constants::{ESY_MANIFEST_FILE, OVERRIDES_FILE, PACKAGE_JSON_FILE, RELEASE_DIR};
use crate::error::ReleaseResult;
use crate::installer::install_binary;
use crate::manifest::EsyManifest;
use crate::overrides::{OverrideTable, apply_overrides};
use crate::platform::Platform;
use crate::release::{derive_package_json, write_package_json};
use colored::Colorize;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Patch esy.json with the override table entry for the host platform.
pub fn handle_patch() -> ReleaseResult<()> {
    let platform = Platform::detect()?;
    let manifest_path = PathBuf::from(ESY_MANIFEST_FILE);

    let table = OverrideTable::load_or_builtin(Path::new(OVERRIDES_FILE))?;
    let manifest = EsyManifest::load(&manifest_path)?;
    let patched = apply_overrides(&manifest, &table, platform);
    patched.save(&manifest_path)?;

    println!(
        "  {} Patched {} for {}",
        "✓".bright_green(),
        ESY_MANIFEST_FILE,
        platform.to_string().bright_cyan()
    );
    Ok(())
}

/// Derive the distributable package.json from esy.json.
pub fn handle_derive() -> ReleaseResult<()> {
    let manifest = EsyManifest::load(Path::new(ESY_MANIFEST_FILE))?;
    let pkg = derive_package_json(&manifest);

    let out_path = Path::new(RELEASE_DIR).join(PACKAGE_JSON_FILE);
    write_package_json(&pkg, &out_path)?;

    println!(
        "  {} Wrote {}",
        "✓".bright_green(),
        out_path.display().to_string().bright_cyan()
    );
    Ok(())
}

/// Install the prebuilt binary for the host platform.
pub fn handle_postinstall() -> ReleaseResult<()> {
    let platform = Platform::detect()?;
    let dest = install_binary(&bundle_dir()?, platform)?;

    println!(
        "  {} Installed {}",
        "✓".bright_green(),
        dest.display().to_string().bright_cyan()
    );
    Ok(())
}

/// Directory the postinstall hook runs from, which is where the published
/// package bundles the binaries.
fn bundle_dir() -> ReleaseResult<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
