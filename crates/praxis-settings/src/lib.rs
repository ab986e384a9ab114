//! Server settings.
//!
//! Settings resolve in three layers: compiled-in defaults, then the JSON
//! settings file deep-merged on top, then `PRAXIS_*` environment
//! variables. A missing file or an unparsable value never aborts startup;
//! bad input is logged and skipped.

#![deny(unsafe_code)]

pub mod loader;
pub mod types;

pub use loader::{apply_env_overrides, load, settings_path};
pub use types::Settings;
