//! Runtime settings
//!
//! Layered with the usual precedence (Env > File > Defaults). The defaults
//! reproduce the fixed file layout the tools have always used.

use serde::{Deserialize, Serialize};

pub mod loader;

pub use loader::load_settings;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "CONFIG_MERGE_";

/// Largest accepted pretty-print indent.
pub const MAX_INDENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field whose value identifies a record
    pub key_field: String,
    /// Extension of record files, without the leading dot
    pub extension: String,
    /// Name of the generated file, relative to the API directory
    pub output_file: String,
    /// Pretty-print indent width in spaces
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_field: "type_name".to_string(),
            extension: "json".to_string(),
            output_file: "config.json".to_string(),
            indent: 2,
        }
    }
}

impl Settings {
    /// Suffix matched against file names, e.g. `.json`.
    pub fn file_suffix(&self) -> String {
        format!(".{}", self.extension)
    }
}
