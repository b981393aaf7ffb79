//! config-split: fan a combined config.json out into per-type files

use anyhow::Result;

fn main() -> Result<()> {
    config_merge::cli::split::run()
}
