//! Constants for ppx-release.
//!
//! Well-known paths and fixed values of the release pipeline. The pipeline
//! steps agree on these instead of taking command-line flags.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The base manifest file name, expected at the repository root.
pub const ESY_MANIFEST_FILE: &str = "esy.json";

/// Optional override-table file, looked up next to the base manifest.
pub const OVERRIDES_FILE: &str = "platform-overrides.json";

/// Release staging directory for the distributable package.
pub const RELEASE_DIR: &str = "_release";

/// Distributable manifest file name.
pub const PACKAGE_JSON_FILE: &str = "package.json";

/// Directory holding the prebuilt binaries inside the published package.
pub const BINS_DIR: &str = "bins";

/// Base name of the installed executable.
pub const PPX_BINARY: &str = "ppx";

/// Relative paths shipped in the published package.
pub const RELEASE_FILES: [&str; 2] = ["bins", "postinstall.js"];

/// Postinstall command recorded in the distributable manifest.
pub const POSTINSTALL_COMMAND: &str = "node ./postinstall.js";
