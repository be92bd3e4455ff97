//! `assetref optimize <ref>` – URL for a sized rendition.

use anyhow::Result;
use assetref_core::{AssetrefConfig, OptimizeOptions, UrlResolver};

pub fn run_optimize(
    cfg: &AssetrefConfig,
    reference: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
    quality: u8,
) -> Result<()> {
    let options = OptimizeOptions {
        width,
        height,
        quality,
    };
    let url = UrlResolver::new(cfg).get_optimized_url(reference, &options);
    println!("{}", url);
    Ok(())
}
