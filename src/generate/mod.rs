//! Generated config assembly
//!
//! Combines a base config directory with an API-side directory:
//!
//! ```text
//! {config_dir}/default.json           base defaults (required)
//! {config_dir}/types/*.json           base type records (required dir)
//! {config_dir}/credentials/*.json     credential records (required dir)
//! {api_dir}/config/default.json       API-side defaults (required)
//! {api_dir}/config/types/*.json       API-side type records (optional dir)
//! ```
//!
//! and writes `{api_dir}/config.json`.

use crate::config::Settings;
use crate::index::{load_index, load_optional_index, TypeIndex};
use crate::merge::merge_indices;
use crate::render::write_json;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DOCUMENT: &str = "default.json";

/// Everything read from disk for one merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeSources {
    pub base_default: Map<String, Value>,
    pub api_default: Map<String, Value>,
    pub base_types: TypeIndex,
    pub credentials: TypeIndex,
    pub api_types: TypeIndex,
}

impl MergeSources {
    /// Load all inputs. Fails before anything is merged if a required input
    /// is missing or invalid.
    pub fn load(config_dir: &Path, api_dir: &Path, settings: &Settings) -> Result<Self> {
        let api_config_dir = api_dir.join("config");

        let base_default = read_document(&config_dir.join(DEFAULT_DOCUMENT))?;
        let api_default = read_document(&api_config_dir.join(DEFAULT_DOCUMENT))?;

        let base_types = load_index(&config_dir.join("types"), settings)
            .context("Failed loading base types")?;
        let credentials = load_index(&config_dir.join("credentials"), settings)
            .context("Failed loading credentials")?;
        let api_types = load_optional_index(&api_config_dir.join("types"), settings)
            .context("Failed loading API-side types")?;

        Ok(Self { base_default, api_default, base_types, credentials, api_types })
    }

    /// Merge the loaded inputs into the generated config document.
    pub fn into_config(self) -> Value {
        let items = merge_indices(self.base_types, self.api_types);
        build_config(self.base_default, self.api_default, items, self.credentials)
    }
}

/// Outcome of a completed merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub output_path: PathBuf,
    pub items: usize,
    pub credentials: usize,
}

/// Assemble the generated config.
///
/// Top-level fields come from `base_default`, overridden key by key (shallow)
/// by `api_default`; `items` and `credentials` are then set from the indexes.
pub fn build_config(
    base_default: Map<String, Value>,
    api_default: Map<String, Value>,
    items: TypeIndex,
    credentials: TypeIndex,
) -> Value {
    let mut config = base_default;
    for (key, value) in api_default {
        config.insert(key, value);
    }
    config.insert("items".to_string(), Value::Array(items.into_values()));
    config.insert("credentials".to_string(), Value::Array(credentials.into_values()));
    Value::Object(config)
}

/// Run a full merge and write the result to `{api_dir}/{output_file}`.
///
/// The output is only written once every input has loaded; on any failure no
/// file is touched.
pub fn run(config_dir: &Path, api_dir: &Path, settings: &Settings) -> Result<MergeSummary> {
    let sources = MergeSources::load(config_dir, api_dir, settings)?;
    tracing::debug!(
        base_types = sources.base_types.len(),
        api_types = sources.api_types.len(),
        credentials = sources.credentials.len(),
        "inputs loaded"
    );

    let credentials = sources.credentials.len();
    let config = sources.into_config();
    let items = config.get("items").and_then(Value::as_array).map_or(0, Vec::len);

    let output_path = api_dir.join(&settings.output_file);
    write_json(&output_path, &config, settings.indent)?;
    tracing::debug!("wrote {}", output_path.display());

    Ok(MergeSummary { output_path, items, credentials })
}

/// Read a required JSON document that must hold an object.
fn read_document(path: &Path) -> Result<Map<String, Value>> {
    let bytes = fs::read(path).with_context(|| format!("Failed reading {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "Expected a JSON object in {}, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
