//! Preference-ordered selection of the first reachable candidate.
//!
//! Candidates are probed strictly one after another: each probe completes
//! before the next starts, and nothing after the first reachable candidate is
//! probed. Order is caller-significant (e.g. item image, then category image,
//! then site default), so candidates are never raced.

use serde::Serialize;

use crate::probe::{AccessibilityProbe, ProbeFailure, ProbeOutcome};
use crate::url_model::{ResolvedUrl, UrlResolver};

/// One probed candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeAttempt {
    /// Position in the caller's candidate list.
    pub index: usize,
    pub url: ResolvedUrl,
    pub outcome: ProbeOutcome,
}

/// Where the selected URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "from", content = "index", rename_all = "kebab-case")]
pub enum SelectionSource {
    Candidate(usize),
    Fallback,
}

/// Selected URL plus the ordered probe attempts that led to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    pub selected: ResolvedUrl,
    pub source: SelectionSource,
    pub attempts: Vec<ProbeAttempt>,
}

/// Composes a [`UrlResolver`] and an [`AccessibilityProbe`].
#[derive(Debug)]
pub struct FallbackSelector<'a, P: ?Sized> {
    resolver: &'a UrlResolver,
    probe: &'a P,
}

impl<'a, P: AccessibilityProbe + ?Sized> FallbackSelector<'a, P> {
    pub fn new(resolver: &'a UrlResolver, probe: &'a P) -> Self {
        Self { resolver, probe }
    }

    /// First reachable candidate, or the resolved article thumbnail default.
    pub async fn select_best<S>(&self, candidates: &[S]) -> ResolvedUrl
    where
        S: AsRef<str> + Sync,
    {
        self.select_best_with_fallback(candidates, self.resolver.defaults().thumbnail())
            .await
    }

    /// First reachable candidate, or `resolve(fallback)`. Empty candidates are
    /// skipped without probing.
    pub async fn select_best_with_fallback<S>(&self, candidates: &[S], fallback: &str) -> ResolvedUrl
    where
        S: AsRef<str> + Sync,
    {
        self.select_best_report(candidates, fallback).await.selected
    }

    /// Like [`select_best_with_fallback`](Self::select_best_with_fallback),
    /// also returning every probe attempt in order.
    pub async fn select_best_report<S>(&self, candidates: &[S], fallback: &str) -> SelectionReport
    where
        S: AsRef<str> + Sync,
    {
        let mut attempts = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let candidate = candidate.as_ref();
            if candidate.is_empty() {
                continue;
            }
            let url = self.resolver.resolve(Some(candidate));
            let outcome = self.probe.probe(&url).await;
            tracing::debug!(index, url = %url, %outcome, "candidate probed");
            if outcome.failure() == Some(ProbeFailure::RelativeWithoutOrigin) {
                tracing::info!(
                    index,
                    url = %url,
                    "relative candidate skipped: set probe.page_origin to check it"
                );
            }
            attempts.push(ProbeAttempt {
                index,
                url: url.clone(),
                outcome,
            });
            if outcome.is_reachable() {
                tracing::debug!(index, url = %url, "selected candidate");
                return SelectionReport {
                    selected: url,
                    source: SelectionSource::Candidate(index),
                    attempts,
                };
            }
        }

        let selected = self.resolver.resolve_with_fallback(None, fallback);
        tracing::debug!(
            candidates = candidates.len(),
            url = %selected,
            "no candidate reachable, using fallback"
        );
        SelectionReport {
            selected,
            source: SelectionSource::Fallback,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetrefConfig;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Reachable iff the URL is in `ok`; records call order and checks that
    /// no two probes overlap.
    #[derive(Default)]
    struct ScriptedProbe {
        ok: HashSet<String>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedProbe {
        fn reachable(urls: &[&str]) -> Self {
            Self {
                ok: urls.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccessibilityProbe for ScriptedProbe {
        async fn probe(&self, url: &ResolvedUrl) -> ProbeOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.lock().unwrap().push(url.to_string());
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if self.ok.contains(url.as_str()) {
                ProbeOutcome::Reachable
            } else {
                ProbeOutcome::Unreachable(ProbeFailure::NotFound)
            }
        }
    }

    fn resolver() -> UrlResolver {
        UrlResolver::new(&AssetrefConfig::default())
    }

    #[tokio::test]
    async fn first_reachable_wins_and_later_candidates_are_not_probed() {
        let r = resolver();
        let probe = ScriptedProbe::reachable(&[
            "http://localhost:8000/uploads/b.jpg",
            "http://localhost:8000/uploads/c.jpg",
        ]);
        let selector = FallbackSelector::new(&r, &probe);
        let url = selector.select_best(&["a.jpg", "b.jpg", "c.jpg"]).await;
        assert_eq!(url, "http://localhost:8000/uploads/b.jpg");
        assert_eq!(
            probe.calls(),
            vec![
                "http://localhost:8000/uploads/a.jpg",
                "http://localhost:8000/uploads/b.jpg"
            ]
        );
    }

    #[tokio::test]
    async fn empty_input_returns_resolved_default_without_probing() {
        let r = resolver();
        let probe = ScriptedProbe::default();
        let selector = FallbackSelector::new(&r, &probe);
        let empty: [&str; 0] = [];
        assert_eq!(selector.select_best(&empty).await, r.resolve(None));
        assert!(probe.calls().is_empty());
    }

    #[tokio::test]
    async fn exhausted_candidates_use_explicit_fallback() {
        let r = resolver();
        let probe = ScriptedProbe::default();
        let selector = FallbackSelector::new(&r, &probe);
        let url = selector
            .select_best_with_fallback(&["a.jpg", "/uploads/b.jpg"], "/assets/hero.png")
            .await;
        assert_eq!(url, "/assets/hero.png");
        assert_eq!(probe.calls().len(), 2);
    }

    #[tokio::test]
    async fn empty_candidates_are_skipped() {
        let r = resolver();
        let probe = ScriptedProbe::reachable(&["https://cdn.example.com/x.jpg"]);
        let selector = FallbackSelector::new(&r, &probe);
        let candidates = vec![String::new(), "https://cdn.example.com/x.jpg".to_string()];
        let report = selector.select_best_report(&candidates, "").await;
        assert_eq!(report.selected, "https://cdn.example.com/x.jpg");
        assert_eq!(report.source, SelectionSource::Candidate(1));
        assert_eq!(report.attempts.len(), 1);
        assert_eq!(report.attempts[0].index, 1);
    }

    #[tokio::test]
    async fn probes_never_overlap() {
        let r = resolver();
        let probe = ScriptedProbe::default();
        let selector = FallbackSelector::new(&r, &probe);
        let candidates: Vec<String> = (0..8).map(|i| format!("img{i}.jpg")).collect();
        let report = selector.select_best_report(&candidates, "").await;
        assert_eq!(report.source, SelectionSource::Fallback);
        assert_eq!(report.attempts.len(), 8);
        assert_eq!(probe.max_in_flight.load(Ordering::SeqCst), 1);
        let indices: Vec<usize> = report.attempts.iter().map(|a| a.index).collect();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let r = resolver();
        let probe: Box<dyn AccessibilityProbe> =
            Box::new(ScriptedProbe::reachable(&["/assets/logo.png"]));
        let selector = FallbackSelector::new(&r, probe.as_ref());
        assert_eq!(
            selector.select_best(&["/assets/logo.png"]).await,
            "/assets/logo.png"
        );
    }

    #[tokio::test]
    async fn static_assets_without_page_origin_fall_through() {
        let r = resolver();
        let probe = crate::probe::CurlProbe::default();
        let selector = FallbackSelector::new(&r, &probe);
        let report = selector
            .select_best_report(&["/assets/logo.png"], "https://cdn.example.com/f.png")
            .await;
        assert_eq!(report.source, SelectionSource::Fallback);
        assert_eq!(
            report.attempts[0].outcome,
            ProbeOutcome::Unreachable(ProbeFailure::RelativeWithoutOrigin)
        );
    }

    #[test]
    fn report_serializes() {
        let report = SelectionReport {
            selected: resolver().resolve(Some("/assets/a.png")),
            source: SelectionSource::Candidate(2),
            attempts: Vec::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["selected"], "/assets/a.png");
        assert_eq!(json["source"]["from"], "candidate");
        assert_eq!(json["source"]["index"], 2);
    }
}
