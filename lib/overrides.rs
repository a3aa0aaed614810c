//! Platform-conditioned override tables for the base manifest.
//!
//! Each release generation pins its toolchain through a table of
//! (platform, override operations). Changing a pin is a data edit to the
//! table, not a code change in the patcher.

use crate::error::{ReleaseError, ReleaseResult};
use crate::manifest::EsyManifest;
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A single manifest override operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverrideOp {
    /// Force a resolution pin for a transitive dependency.
    ///
    /// `value` is either a source reference string or a
    /// `{ "source": ..., "override": ... }` object.
    Resolution { package: String, value: Value },

    /// Pin a direct dependency to a fixed constraint.
    Dependency { package: String, value: Value },
}

/// Versioned table of per-platform override operations.
///
/// A platform with no entry is a pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideTable {
    /// Table format version.
    pub version: u32,

    /// Operations to apply, keyed by platform.
    #[serde(default)]
    pub platforms: BTreeMap<Platform, Vec<OverrideOp>>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl OverrideTable {
    /// Built-in table carrying the current release generation's pins.
    pub fn builtin() -> Self {
        let mut platforms = BTreeMap::new();
        platforms.insert(
            Platform::Windows,
            vec![OverrideOp::Resolution {
                package: "@opam/conf-libssl".to_string(),
                value: json!("esy-packages/esy-openssl#4476291"),
            }],
        );
        platforms.insert(
            Platform::Macos,
            vec![OverrideOp::Dependency {
                package: "ocaml".to_string(),
                value: json!("4.6.1000"),
            }],
        );

        Self {
            version: 1,
            platforms,
        }
    }

    /// Load a table from a JSON file, falling back to the built-in table
    /// when the file is absent.
    pub fn load_or_builtin(path: &Path) -> ReleaseResult<Self> {
        if !path.exists() {
            return Ok(Self::builtin());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ReleaseError::ConfigParseError {
                path: path.to_path_buf(),
                message: format!("Failed to read override table: {}", e),
            })?;

        serde_json::from_str(&content).map_err(|e| ReleaseError::ConfigParseError {
            path: path.to_path_buf(),
            message: format!("Invalid JSON: {}", e),
        })
    }

    /// Operations for one platform. An empty slice means pass-through.
    pub fn ops_for(&self, platform: Platform) -> &[OverrideOp] {
        self.platforms
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Apply the table's operations for `platform`, returning the patched manifest.
///
/// The input manifest is not mutated. `resolutions` is always materialized
/// in the result. Map inserts overwrite in place, so re-applying the same
/// table is idempotent.
pub fn apply_overrides(
    manifest: &EsyManifest,
    table: &OverrideTable,
    platform: Platform,
) -> EsyManifest {
    let mut patched = manifest.clone();
    patched.ensure_resolutions();

    for op in table.ops_for(platform) {
        match op {
            OverrideOp::Resolution { package, value } => {
                tracing::debug!(%platform, %package, "pinning resolution");
                patched
                    .ensure_resolutions()
                    .insert(package.clone(), value.clone());
            }
            OverrideOp::Dependency { package, value } => {
                tracing::debug!(%platform, %package, "pinning dependency");
                patched
                    .ensure_dependencies()
                    .insert(package.clone(), value.clone());
            }
        }
    }

    patched
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> EsyManifest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_windows_pins_ssl_resolution() {
        let input = manifest(json!({
            "name": "x",
            "version": "1.0.0",
            "dependencies": {}
        }));

        let patched = apply_overrides(&input, &OverrideTable::builtin(), Platform::Windows);

        let expected = manifest(json!({
            "name": "x",
            "version": "1.0.0",
            "dependencies": {},
            "resolutions": {
                "@opam/conf-libssl": "esy-packages/esy-openssl#4476291"
            }
        }));
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_macos_pins_toolchain_dependency() {
        let input = manifest(json!({
            "name": "x",
            "version": "1.0.0",
            "dependencies": { "@opam/dune": "*" }
        }));

        let patched = apply_overrides(&input, &OverrideTable::builtin(), Platform::Macos);

        let deps = patched.dependencies.as_ref().unwrap();
        assert_eq!(deps["ocaml"], json!("4.6.1000"));
        assert_eq!(deps["@opam/dune"], json!("*"));
    }

    #[test]
    fn test_linux_is_pass_through() {
        let input = manifest(json!({
            "name": "x",
            "version": "1.0.0",
            "dependencies": { "@opam/dune": "*" },
            "resolutions": { "pinned": "1.2.3" }
        }));

        let patched = apply_overrides(&input, &OverrideTable::builtin(), Platform::Linux);

        assert_eq!(patched.dependencies, input.dependencies);
        assert_eq!(patched.resolutions, input.resolutions);
    }

    #[test]
    fn test_resolutions_materialized_for_every_platform() {
        for &platform in Platform::all() {
            let input = manifest(json!({ "name": "x", "version": "1.0.0" }));
            let patched = apply_overrides(&input, &OverrideTable::builtin(), platform);
            assert!(patched.resolutions.is_some(), "platform {}", platform);
        }
    }

    #[test]
    fn test_patch_is_idempotent() {
        let table = OverrideTable::builtin();
        for &platform in Platform::all() {
            let input = manifest(json!({
                "name": "x",
                "version": "1.0.0",
                "dependencies": { "@opam/dune": "*" }
            }));

            let once = apply_overrides(&input, &table, platform);
            let twice = apply_overrides(&once, &table, platform);
            assert_eq!(once, twice, "platform {}", platform);
        }
    }

    #[test]
    fn test_table_round_trips_resolution_objects() {
        // The source + build-override form some release generations pin
        // the toolchain with.
        let table: OverrideTable = serde_json::from_value(json!({
            "version": 2,
            "platforms": {
                "macos": [{
                    "kind": "resolution",
                    "package": "ocaml",
                    "value": {
                        "source": "esy-ocaml/ocaml#6f1b6ab",
                        "override": { "build": ["./configure", "make world.opt"] }
                    }
                }]
            }
        }))
        .unwrap();

        let input = manifest(json!({ "name": "x", "version": "1.0.0" }));
        let patched = apply_overrides(&input, &table, Platform::Macos);
        assert_eq!(
            patched.resolutions.as_ref().unwrap()["ocaml"]["source"],
            json!("esy-ocaml/ocaml#6f1b6ab")
        );
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let table = OverrideTable::load_or_builtin(&dir.path().join("missing.json")).unwrap();
        assert_eq!(table, OverrideTable::builtin());
    }

    #[test]
    fn test_load_or_builtin_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("platform-overrides.json");
        std::fs::write(
            &path,
            r#"{
  "version": 3,
  "platforms": {
    "windows": [
      { "kind": "resolution", "package": "@opam/conf-libssl", "value": "esy-packages/esy-openssl#abc1234" }
    ]
  }
}"#,
        )
        .unwrap();

        let table = OverrideTable::load_or_builtin(&path).unwrap();
        assert_eq!(table.version, 3);
        assert_eq!(table.ops_for(Platform::Windows).len(), 1);
        assert!(table.ops_for(Platform::Macos).is_empty());
    }

    #[test]
    fn test_load_or_builtin_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("platform-overrides.json");
        std::fs::write(&path, "nope").unwrap();
        let err = OverrideTable::load_or_builtin(&path).unwrap_err();
        assert!(matches!(err, ReleaseError::ConfigParseError { .. }));
    }
}
