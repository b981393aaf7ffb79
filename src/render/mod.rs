//! Pretty JSON rendering

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// Serialize `value` with `indent` spaces per level and no trailing newline.
///
/// An indent of zero gives compact single-line output.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Render `value` in full, then write it to `path` with a single call.
///
/// The parent directory must already exist. An existing file is overwritten.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: usize) -> Result<()> {
    let rendered = to_pretty_json(value, indent)?;
    std::fs::write(path, rendered).with_context(|| format!("Failed writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{to_pretty_json, write_json};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn two_space_indent_matches_default_pretty_printer() {
        let value = json!({"env": "api", "items": [{"type_name": "a"}]});
        let rendered = to_pretty_json(&value, 2).expect("render");
        assert_eq!(rendered, serde_json::to_string_pretty(&value).expect("pretty"));
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn custom_indent_width() {
        let rendered = to_pretty_json(&json!({"a": 1}), 4).expect("render");
        assert_eq!(rendered, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn zero_indent_is_compact() {
        let rendered = to_pretty_json(&json!({"a": [1, 2], "b": {"c": null}}), 0).expect("render");
        assert_eq!(rendered, r#"{"a":[1,2],"b":{"c":null}}"#);
    }

    #[test]
    fn write_overwrites_existing_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("out.json");
        fs::write(&path, "stale content that is longer than the new one").expect("seed");

        write_json(&path, &json!({"fresh": true}), 2).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "{\n  \"fresh\": true\n}");
    }

    #[test]
    fn write_fails_when_parent_missing() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("missing").join("out.json");
        let err = write_json(&path, &json!({}), 2).expect_err("no parent");
        assert!(err.to_string().contains("Failed writing"));
    }
}
