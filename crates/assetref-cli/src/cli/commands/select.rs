//! `assetref select <ref>...` – first reachable candidate, or the fallback.

use anyhow::{Context, Result};
use assetref_core::{
    AssetrefConfig, CurlProbe, DefaultImageRole, FallbackSelector, ProbeFailure,
    SelectionReport, SelectionSource, UrlResolver,
};

use super::fallback_reference;

/// Hint printed under the report when relative candidates could not be checked.
fn missing_origin_note(report: &SelectionReport) -> Option<String> {
    let skipped: Vec<String> = report
        .attempts
        .iter()
        .filter(|a| a.outcome.failure() == Some(ProbeFailure::RelativeWithoutOrigin))
        .map(|a| a.index.to_string())
        .collect();
    if skipped.is_empty() {
        return None;
    }
    Some(format!(
        "Note: candidate(s) {} are relative and were not checked; \
         set probe.page_origin in config.toml to check them",
        skipped.join(", ")
    ))
}

fn print_report(report: &SelectionReport) {
    println!("  {:>5}  {:<28}  {}", "Index", "Outcome", "URL");
    println!("  {}  {}  {}", "-----", "-".repeat(28), "---");
    for a in &report.attempts {
        println!(
            "  {:>5}  {:<28}  {}",
            a.index,
            a.outcome.to_string(),
            a.url
        );
    }
    match report.source {
        SelectionSource::Candidate(i) => println!("Selected candidate {}: {}", i, report.selected),
        SelectionSource::Fallback => println!("Selected fallback: {}", report.selected),
    }
    if let Some(note) = missing_origin_note(report) {
        println!("{}", note);
    }
}

pub async fn run_select(
    cfg: &AssetrefConfig,
    candidates: &[String],
    fallback: Option<&str>,
    role: Option<DefaultImageRole>,
    report: bool,
    json: bool,
) -> Result<()> {
    let resolver = UrlResolver::new(cfg);
    let probe = CurlProbe::new(&cfg.probe);
    let selector = FallbackSelector::new(&resolver, &probe);
    let fallback = fallback_reference(cfg, fallback, role);
    let result = selector.select_best_report(candidates, fallback).await;

    if json {
        let out = serde_json::to_string_pretty(&result).context("serialize report")?;
        println!("{}", out);
    } else if report {
        print_report(&result);
    } else {
        println!("{}", result.selected);
    }
    Ok(())
}
