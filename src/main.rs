//! config-merge: build a generated config.json from base and API-side config

use anyhow::Result;

fn main() -> Result<()> {
    config_merge::cli::run()
}
