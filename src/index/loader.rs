//! Directory-to-index loading

use super::TypeIndex;
use crate::config::Settings;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed listing {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a candidate file was left out of an index.
#[derive(Debug)]
enum Skip {
    Parse(serde_json::Error),
    MissingKey,
}

/// Build an index from every `*.{extension}` file directly inside `dir`.
///
/// Files are visited in file-name order. A file that does not parse, or that
/// has no usable key field, is skipped with a warning; the rest of the
/// directory is still indexed. A later file with the same key replaces the
/// earlier record.
pub fn load_index(dir: &Path, settings: &Settings) -> Result<TypeIndex, IndexError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(IndexError::NotADirectory(dir.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(IndexError::MissingDirectory(dir.to_path_buf()));
        }
        Err(source) => return Err(IndexError::Read { path: dir.to_path_buf(), source }),
    }

    let suffix = settings.file_suffix();
    let mut index = TypeIndex::new();
    let mut skipped = 0usize;

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => match dangling_link(&err) {
                // a broken link only matters when it would have been loaded
                Some(path) if !has_suffix(&path, &suffix) => {
                    tracing::debug!("ignoring dangling link {}", path.display());
                    continue;
                }
                Some(path) => {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::from(io::ErrorKind::NotFound));
                    return Err(IndexError::Read { path, source });
                }
                None => return Err(IndexError::List { path: dir.to_path_buf(), source: err }),
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }

        if !has_suffix(entry.path(), &suffix) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();

        let bytes = fs::read(entry.path())
            .map_err(|source| IndexError::Read { path: entry.path().to_path_buf(), source })?;

        match parse_record(&bytes, &settings.key_field) {
            Ok((key, record)) => {
                if index.insert(key.clone(), record).is_some() {
                    tracing::debug!("{} replaces an earlier record for '{}'", file_name, key);
                }
            }
            Err(Skip::MissingKey) => {
                skipped += 1;
                tracing::warn!(
                    "File {} does not contain '{}' property.",
                    file_name,
                    settings.key_field
                );
            }
            Err(Skip::Parse(err)) => {
                skipped += 1;
                tracing::warn!("Error reading {}: {}", file_name, err);
            }
        }
    }

    tracing::debug!(
        "loaded {} records from {} ({} skipped)",
        index.len(),
        dir.display(),
        skipped
    );
    Ok(index)
}

/// Like [`load_index`], but a missing directory yields an empty index.
///
/// Only absence is tolerated: a path that exists but cannot be listed or read
/// still fails.
pub fn load_optional_index(dir: &Path, settings: &Settings) -> Result<TypeIndex, IndexError> {
    match load_index(dir, settings) {
        Err(IndexError::MissingDirectory(path)) => {
            tracing::debug!("optional directory {} is absent, using no records", path.display());
            Ok(TypeIndex::new())
        }
        other => other,
    }
}

/// Path of an entry whose link target does not exist.
fn dangling_link(err: &walkdir::Error) -> Option<PathBuf> {
    let not_found = err.io_error().is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    err.path().filter(|_| not_found).map(Path::to_path_buf)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name().is_some_and(|name| name.to_string_lossy().ends_with(suffix))
}

fn parse_record(bytes: &[u8], key_field: &str) -> Result<(String, Value), Skip> {
    let record: Value = serde_json::from_slice(bytes).map_err(Skip::Parse)?;
    let key = record
        .get(key_field)
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(Skip::MissingKey)?;
    Ok((key, record))
}
