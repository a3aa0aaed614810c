//! Platform binary installation.

use crate::constants::{BINS_DIR, PPX_BINARY};
use crate::error::{ReleaseError, ReleaseResult};
use crate::platform::Platform;
use std::fs;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Source path of the bundled prebuilt binary for `platform`.
pub fn asset_path(bundle_dir: &Path, platform: Platform) -> PathBuf {
    bundle_dir.join(BINS_DIR).join(platform.asset_name())
}

/// Canonical destination path of the installed binary.
pub fn install_dest(bundle_dir: &Path, platform: Platform) -> PathBuf {
    bundle_dir.join(format!("{}{}", PPX_BINARY, platform.exe_suffix()))
}

/// Install the prebuilt binary for exactly one platform.
///
/// An existing file at the destination is removed first so stale permission
/// bits do not survive the reinstall. The installed binary is made
/// executable for every principal.
pub fn install_binary(bundle_dir: &Path, platform: Platform) -> ReleaseResult<PathBuf> {
    let source = asset_path(bundle_dir, platform);
    if !source.exists() {
        return Err(ReleaseError::AssetNotFound(source));
    }

    let data = fs::read(&source)?;
    let dest = install_dest(bundle_dir, platform);

    let install_err = |e: std::io::Error| ReleaseError::InstallWriteError {
        path: dest.clone(),
        message: e.to_string(),
    };

    if dest.exists() {
        fs::remove_file(&dest).map_err(install_err)?;
    }

    fs::write(&dest, &data).map_err(install_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o777)).map_err(install_err)?;
    }

    tracing::debug!(
        source = %source.display(),
        dest = %dest.display(),
        "binary installed"
    );
    Ok(dest)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
