//! config-split command

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::{init_logging, parse_or_exit, CommonArgs};
use crate::config::load_settings;
use crate::split;

/// Split a combined config.json into one file per type record
#[derive(Parser)]
#[command(name = "config-split")]
#[command(author, version, about, long_about = None)]
pub struct SplitCli {
    /// Combined config document to read
    #[arg(value_name = "INPUT", default_value = "config.json")]
    pub input: PathBuf,

    /// Existing directory that receives the per-type files
    #[arg(value_name = "OUT_DIR", default_value = "config/types")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run() -> Result<()> {
    let cli: SplitCli = parse_or_exit();
    init_logging(cli.common.verbose);

    let settings = load_settings(cli.common.settings.as_deref())?;
    let written = split::run(&cli.input, &cli.out_dir, &settings)?;
    println!("Wrote {} files to {}", written.len(), cli.out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SplitCli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_valid() {
        SplitCli::command().debug_assert();
    }

    #[test]
    fn defaults_to_local_layout() {
        let cli = SplitCli::try_parse_from(["config-split"]).expect("parse");
        assert_eq!(cli.input, PathBuf::from("config.json"));
        assert_eq!(cli.out_dir, PathBuf::from("config/types"));
        assert!(!cli.common.verbose);
    }
}
