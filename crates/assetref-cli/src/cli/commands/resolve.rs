//! `assetref resolve <ref>` – resolve a reference into a URL.

use anyhow::Result;
use assetref_core::{AssetrefConfig, DefaultImageRole, UrlResolver};

use super::fallback_reference;

pub fn run_resolve(
    cfg: &AssetrefConfig,
    reference: Option<&str>,
    fallback: Option<&str>,
    role: Option<DefaultImageRole>,
    explain: bool,
) -> Result<()> {
    let resolver = UrlResolver::new(cfg);
    let fallback = fallback_reference(cfg, fallback, role);
    let url = resolver.resolve_with_fallback(reference, fallback);
    if explain {
        let shape = resolver.classify(reference.unwrap_or(""));
        println!("{:<8} {}", "shape", shape);
        if reference.map_or(true, str::is_empty) {
            println!("{:<8} {}", "fallback", fallback);
        }
        println!("{:<8} {}", "url", url);
    } else {
        println!("{}", url);
    }
    Ok(())
}
