//! Distributable manifest derivation.

use crate::constants::{POSTINSTALL_COMMAND, RELEASE_FILES};
use crate::error::{ReleaseError, ReleaseResult};
use crate::manifest::EsyManifest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The minimal `package.json` shipped with a binary release.
///
/// A strict projection of the base manifest: nothing outside this field set
/// is ever propagated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasePackageJson {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub scripts: ReleaseScripts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Value>,
}

/// Script entries of the distributable manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseScripts {
    pub postinstall: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Project the distributable manifest out of the base manifest.
pub fn derive_package_json(manifest: &EsyManifest) -> ReleasePackageJson {
    ReleasePackageJson {
        name: manifest.name.clone(),
        version: manifest.version.clone(),
        description: manifest.description.clone(),
        license: manifest.license.clone(),
        files: RELEASE_FILES.iter().map(|f| f.to_string()).collect(),
        keywords: manifest.keywords.clone(),
        scripts: ReleaseScripts {
            postinstall: POSTINSTALL_COMMAND.to_string(),
        },
        repository: manifest.repository.clone(),
    }
}

/// Write the distributable manifest to `path`.
///
/// The parent directory is the release staging area prepared by the
/// surrounding pipeline; it is not created here.
pub fn write_package_json(pkg: &ReleasePackageJson, path: &Path) -> ReleaseResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(ReleaseError::WriteError {
                path: path.to_path_buf(),
                message: format!("Release directory {} does not exist", parent.display()),
            });
        }
    }

    let content = serde_json::to_string_pretty(pkg)?;
    fs::write(path, content).map_err(|e| ReleaseError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "distributable manifest written");
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
