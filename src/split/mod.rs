//! Split a combined config document into one file per type record

use crate::config::Settings;
use crate::render::write_json;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read `input` and write each of its `items` to `out_dir`.
pub fn run(input: &Path, out_dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let content =
        fs::read(input).with_context(|| format!("Failed reading {}", input.display()))?;
    let document: Value = serde_json::from_slice(&content)
        .with_context(|| format!("Invalid JSON in {}", input.display()))?;
    split_items(&document, out_dir, settings)
}

/// Write every record in `document.items` to `{out_dir}/{key}.{extension}`.
///
/// `items` may be an array or an object whose values are records. The output
/// directory must already exist. Every record is validated before the first
/// file is written.
pub fn split_items(document: &Value, out_dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let records: Vec<(String, &Value)> = match document.get("items") {
        Some(Value::Array(items)) => {
            items.iter().enumerate().map(|(i, item)| (i.to_string(), item)).collect()
        }
        Some(Value::Object(items)) => items.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(_) => anyhow::bail!("'items' must be an array or an object"),
        None => anyhow::bail!("Document has no 'items' field"),
    };

    if !out_dir.is_dir() {
        anyhow::bail!("Output directory not found: {}", out_dir.display());
    }

    let mut targets = Vec::with_capacity(records.len());
    for (position, record) in &records {
        let key = record_key(record, &settings.key_field)
            .with_context(|| format!("Invalid item at '{}'", position))?;
        targets.push((out_dir.join(format!("{}.{}", key, settings.extension)), *record));
    }

    let mut written = Vec::with_capacity(targets.len());
    for (path, record) in targets {
        write_json(&path, record, settings.indent)?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn record_key<'a>(record: &'a Value, key_field: &str) -> Result<&'a str> {
    let key = record
        .get(key_field)
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .with_context(|| format!("missing string '{}' field", key_field))?;

    if key == "." || key == ".." || key.contains('/') || key.contains('\\') {
        anyhow::bail!("'{}' value '{}' is not a valid file name", key_field, key);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn splits_array_items_into_files() {
        let tmp = TempDir::new().expect("tmp");
        let document = json!({
            "api_version": "21.8.0",
            "items": [
                {"type_name": "user", "endpoint": "/api/v2/users/"},
                {"type_name": "team", "endpoint": "/api/v2/teams/"}
            ]
        });

        let written = split_items(&document, tmp.path(), &Settings::default()).expect("split");
        assert_eq!(written, vec![tmp.path().join("user.json"), tmp.path().join("team.json")]);

        let user = fs::read_to_string(tmp.path().join("user.json")).expect("read");
        assert_eq!(
            user,
            serde_json::to_string_pretty(&json!({"type_name": "user", "endpoint": "/api/v2/users/"}))
                .expect("pretty")
        );
    }

    #[test]
    fn splits_object_items_by_record_key() {
        let tmp = TempDir::new().expect("tmp");
        let document = json!({"items": {"first": {"type_name": "one"}, "second": {"type_name": "two"}}});

        let written = split_items(&document, tmp.path(), &Settings::default()).expect("split");
        assert_eq!(written.len(), 2);
        assert!(tmp.path().join("one.json").is_file());
        assert!(tmp.path().join("two.json").is_file());
    }

    #[test]
    fn item_without_key_fails_before_writing() {
        let tmp = TempDir::new().expect("tmp");
        let document = json!({"items": [{"type_name": "ok"}, {"name": "nokey"}]});

        let err = split_items(&document, tmp.path(), &Settings::default()).expect_err("no key");
        assert!(format!("{:#}", err).contains("Invalid item at '1'"));
        assert!(!tmp.path().join("ok.json").exists());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let tmp = TempDir::new().expect("tmp");
        for bad in ["../escape", "..", "a/b"] {
            let document = json!({"items": [{"type_name": bad}]});
            assert!(split_items(&document, tmp.path(), &Settings::default()).is_err(), "{}", bad);
        }
    }

    #[test]
    fn missing_output_directory_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        let document = json!({"items": [{"type_name": "a"}]});
        let err = split_items(&document, &tmp.path().join("config/types"), &Settings::default())
            .expect_err("missing dir");
        assert!(err.to_string().contains("Output directory not found"));
    }

    #[test]
    fn items_must_be_present_and_a_collection() {
        let tmp = TempDir::new().expect("tmp");
        assert!(split_items(&json!({}), tmp.path(), &Settings::default()).is_err());
        assert!(split_items(&json!({"items": 3}), tmp.path(), &Settings::default()).is_err());
    }

    #[test]
    fn run_reads_input_file() {
        let tmp = TempDir::new().expect("tmp");
        let input = tmp.path().join("config.json");
        fs::write(&input, r#"{"items":[{"type_name":"host"}]}"#).expect("write");
        let out_dir = tmp.path().join("types");
        fs::create_dir(&out_dir).expect("mkdir");

        let written = run(&input, &out_dir, &Settings::default()).expect("split");
        assert_eq!(written, vec![out_dir.join("host.json")]);
    }
}
