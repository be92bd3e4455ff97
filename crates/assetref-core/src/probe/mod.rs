//! Reachability probing.
//!
//! A probe answers one question for one URL: can it be loaded right now?
//! [`AccessibilityProbe`] is the seam; [`CurlProbe`] answers it over HTTP
//! with a HEAD request, and tests substitute scripted probes.

mod classify;
mod curl_probe;

pub use classify::{classify_curl_error, classify_http_status, is_head_rejected, ProbeFailure};
pub use curl_probe::CurlProbe;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::url_model::ResolvedUrl;

/// Outcome of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "failure", rename_all = "kebab-case")]
pub enum ProbeOutcome {
    Reachable,
    Unreachable(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }

    pub fn failure(&self) -> Option<ProbeFailure> {
        match self {
            ProbeOutcome::Reachable => None,
            ProbeOutcome::Unreachable(f) => Some(*f),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable => write!(f, "reachable"),
            ProbeOutcome::Unreachable(cause) => write!(f, "unreachable ({})", cause),
        }
    }
}

/// Capability to check whether a resolved URL can be loaded.
///
/// Each call is independent: implementations keep no state between calls and
/// concurrent probes for different URLs must not interfere.
#[async_trait]
pub trait AccessibilityProbe: Send + Sync {
    async fn probe(&self, url: &ResolvedUrl) -> ProbeOutcome;

    /// Boolean form of [`probe`](Self::probe).
    async fn is_accessible(&self, url: &ResolvedUrl) -> bool {
        self.probe(url).await.is_reachable()
    }
}

#[async_trait]
impl<P: AccessibilityProbe + ?Sized> AccessibilityProbe for Arc<P> {
    async fn probe(&self, url: &ResolvedUrl) -> ProbeOutcome {
        (**self).probe(url).await
    }
}

#[async_trait]
impl<P: AccessibilityProbe + ?Sized> AccessibilityProbe for Box<P> {
    async fn probe(&self, url: &ResolvedUrl) -> ProbeOutcome {
        (**self).probe(url).await
    }
}
