//! Command-line interface for config-merge and config-split
//!
//! Both binaries share logging setup and the `--verbose`/`--settings` options.

use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::load_settings;
use crate::generate;

pub mod split;

/// Merge base and API-side type configuration into a generated config.json
#[derive(Parser)]
#[command(name = "config-merge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base configuration directory (default.json, types/, credentials/)
    #[arg(value_name = "CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// API directory (config/default.json, optional config/types/)
    #[arg(value_name = "API_DIR")]
    pub api_dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by both tools.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file (.toml, .yaml or .yml)
    #[arg(short = 's', long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli: Cli = parse_or_exit();
    init_logging(cli.common.verbose);

    let settings = load_settings(cli.common.settings.as_deref())?;

    println!("Config directory: {}", cli.config_dir.display());
    println!("API directory: {}", cli.api_dir.display());

    let summary = generate::run(&cli.config_dir, &cli.api_dir, &settings)?;
    println!(
        "Wrote {} ({} items, {} credentials)",
        summary.output_path.display(),
        summary.items,
        summary.credentials
    );
    Ok(())
}

/// Parse arguments; usage errors go to stderr with exit status 1.
pub(crate) fn parse_or_exit<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}

pub(crate) fn init_logging(verbose: bool) {
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
