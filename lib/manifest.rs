//! Base manifest loading, transformation, and saving.

use crate::error::{ReleaseError, ReleaseResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The base esy manifest.
///
/// Only the fields the release pipeline touches are modeled. Every other
/// field round-trips through `extra` untouched, and insertion order is
/// preserved end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsyManifest {
    /// Package name.
    pub name: String,

    /// Package version.
    pub version: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// SPDX license identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Search keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Repository reference (string or object form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Value>,

    /// Direct dependencies: package name to constraint or override object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Map<String, Value>>,

    /// Forced resolution pins for transitive dependencies.
    ///
    /// Absent in many manifests on disk; materialized lazily before the
    /// first write so existing entries are never discarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<Map<String, Value>>,

    /// Fields the release pipeline does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl EsyManifest {
    /// Load the manifest from disk.
    pub fn load(path: &Path) -> ReleaseResult<Self> {
        if !path.exists() {
            return Err(ReleaseError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ReleaseError::ConfigParseError {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        serde_json::from_str(&content).map_err(|e| ReleaseError::ConfigParseError {
            path: path.to_path_buf(),
            message: format!("Invalid JSON: {}", e),
        })
    }

    /// Ensure the `resolutions` map exists, preserving existing entries.
    pub fn ensure_resolutions(&mut self) -> &mut Map<String, Value> {
        self.resolutions.get_or_insert_with(Map::new)
    }

    /// Ensure the `dependencies` map exists, preserving existing entries.
    pub fn ensure_dependencies(&mut self) -> &mut Map<String, Value> {
        self.dependencies.get_or_insert_with(Map::new)
    }

    /// Save the manifest, replacing the file wholesale.
    ///
    /// Writes to a temp file in the same directory and renames over the
    /// destination, so the old manifest is either fully replaced or left
    /// alone. An interruption between the temp write and the rename leaves
    /// the original file intact.
    pub fn save(&self, path: &Path) -> ReleaseResult<()> {
        let content = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");

        let write_err = |e: std::io::Error| ReleaseError::WriteError {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        {
            let mut file = fs::File::create(&temp_path).map_err(write_err)?;
            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ReleaseError::WriteError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(path = %path.display(), "manifest written");
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = EsyManifest::load(&dir.path().join("esy.json")).unwrap_err();
        assert!(matches!(err, ReleaseError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esy.json");
        std::fs::write(&path, "{ not json }").unwrap();
        let err = EsyManifest::load(&path).unwrap_err();
        assert!(matches!(err, ReleaseError::ConfigParseError { .. }));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esy.json");
        std::fs::write(
            &path,
            r#"{
  "name": "x",
  "version": "1.0.0",
  "esy": { "build": "dune build" },
  "devDependencies": { "@opam/merlin": "*" }
}"#,
        )
        .unwrap();

        let manifest = EsyManifest::load(&path).unwrap();
        assert_eq!(manifest.extra["esy"], json!({ "build": "dune build" }));

        manifest.save(&path).unwrap();
        let reloaded = EsyManifest::load(&path).unwrap();
        assert_eq!(manifest, reloaded);
        assert_eq!(
            reloaded.extra["devDependencies"],
            json!({ "@opam/merlin": "*" })
        );
    }

    #[test]
    fn test_ensure_resolutions_preserves_entries() {
        let mut manifest: EsyManifest = serde_json::from_value(json!({
            "name": "x",
            "version": "1.0.0",
            "resolutions": { "pinned": "1.2.3" }
        }))
        .unwrap();

        manifest.ensure_resolutions();
        assert_eq!(
            manifest.resolutions.as_ref().unwrap()["pinned"],
            json!("1.2.3")
        );
    }

    #[test]
    fn test_save_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esy.json");
        std::fs::write(&path, r#"{ "name": "old", "version": "0.0.1" }"#).unwrap();

        let manifest: EsyManifest = serde_json::from_value(json!({
            "name": "new",
            "version": "1.0.0"
        }))
        .unwrap();
        manifest.save(&path).unwrap();

        let reloaded = EsyManifest::load(&path).unwrap();
        assert_eq!(reloaded.name, "new");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
