//! `assetref probe <ref>` – resolve and check reachability.

use anyhow::Result;
use assetref_core::{AccessibilityProbe, AssetrefConfig, CurlProbe, UrlResolver};

pub async fn run_probe(cfg: &AssetrefConfig, reference: &str) -> Result<()> {
    let url = UrlResolver::new(cfg).resolve(Some(reference));
    let outcome = CurlProbe::new(&cfg.probe).probe(&url).await;
    println!("{}  {}", outcome, url);
    if !outcome.is_reachable() {
        anyhow::bail!("{} is not reachable: {}", url, outcome);
    }
    Ok(())
}
