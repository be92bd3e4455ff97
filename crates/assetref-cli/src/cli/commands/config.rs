//! `assetref config` – print the effective configuration.

use anyhow::Result;
use assetref_core::config::{self, AssetrefConfig};

pub fn run_config(cfg: &AssetrefConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
