//! config-merge: merge and split JSON type configuration
//!
//! `config-merge` folds a base config directory and an API-side directory
//! into one generated `config.json`; records sharing a `type_name` are deep
//! merged with arrays appended. `config-split` does the reverse fan-out of a
//! combined document into per-type files.

pub mod cli;
pub mod config;
pub mod generate;
pub mod index;
pub mod merge;
pub mod render;
pub mod split;

pub use config::Settings;
pub use index::{IndexError, TypeIndex};
pub use merge::{merge_indices, merge_values};
