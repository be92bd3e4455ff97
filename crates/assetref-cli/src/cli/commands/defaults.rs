//! `assetref defaults` – list default images.

use anyhow::Result;
use assetref_core::{AssetrefConfig, UrlResolver};

pub fn run_defaults(cfg: &AssetrefConfig) -> Result<()> {
    let resolver = UrlResolver::new(cfg);
    println!("{:<18} {}", "ROLE", "URL");
    for (role, _) in cfg.defaults.iter() {
        println!("{:<18} {}", role, resolver.resolve_role(role));
    }
    Ok(())
}
