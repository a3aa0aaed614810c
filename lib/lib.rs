//! `ppx-release` library.

pub mod commands;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod installer;
pub mod manifest;
pub mod overrides;
pub mod platform;
pub mod release;
pub mod styles;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use handlers::*;
pub use installer::*;
pub use manifest::*;
pub use overrides::*;
pub use platform::*;
pub use release::*;
