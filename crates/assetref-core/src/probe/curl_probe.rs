//! HTTP reachability probe backed by libcurl.

use async_trait::async_trait;
use std::time::Duration;

use super::classify::{classify_curl_error, classify_http_status, is_head_rejected};
use super::{AccessibilityProbe, ProbeFailure, ProbeOutcome};
use crate::config::ProbeConfig;
use crate::url_model::ResolvedUrl;

const MAX_REDIRECTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Head,
    /// `Range: bytes=0-0` GET; the body is abandoned after the first chunk.
    RangedGet,
}

/// Probes a URL with a HEAD request (redirects followed, bounded by timeouts).
///
/// A 2xx final status is reachable. When the server rejects HEAD with 405 or
/// 501 and `get_on_head_rejected` is set, a single ranged GET decides instead.
#[derive(Debug, Clone)]
pub struct CurlProbe {
    connect_timeout: Duration,
    timeout: Duration,
    get_on_head_rejected: bool,
    page_origin: Option<url::Url>,
}

impl Default for CurlProbe {
    fn default() -> Self {
        Self::new(&ProbeConfig::default())
    }
}

impl CurlProbe {
    pub fn new(cfg: &ProbeConfig) -> Self {
        let page_origin = cfg
            .page_origin
            .as_deref()
            .and_then(|o| url::Url::parse(o).ok());
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            get_on_head_rejected: cfg.get_on_head_rejected,
            page_origin,
        }
    }

    /// Turn a resolved URL into something libcurl can fetch. Relative URLs
    /// need a page origin to be joined against.
    fn target(&self, url: &str) -> Result<url::Url, ProbeFailure> {
        let parsed = match url::Url::parse(url) {
            Ok(u) => u,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self
                    .page_origin
                    .as_ref()
                    .ok_or(ProbeFailure::RelativeWithoutOrigin)?;
                base.join(url).map_err(|_| ProbeFailure::InvalidUrl)?
            }
            Err(_) => return Err(ProbeFailure::InvalidUrl),
        };
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            _ => Err(ProbeFailure::InvalidUrl),
        }
    }

    /// Performs the probe on the current thread.
    /// Call from `spawn_blocking` if used from async code.
    pub fn probe_blocking(&self, url: &str) -> ProbeOutcome {
        let target = match self.target(url) {
            Ok(t) => t,
            Err(f) => {
                tracing::debug!(url, "not probeable: {}", f);
                return ProbeOutcome::Unreachable(f);
            }
        };

        let code = match self.request(target.as_str(), Method::Head) {
            Ok(code) if is_head_rejected(code) && self.get_on_head_rejected => {
                tracing::debug!(url, code, "HEAD rejected, probing with ranged GET");
                self.request(target.as_str(), Method::RangedGet)
            }
            other => other,
        };

        let outcome = match code {
            Ok(code) => match classify_http_status(code) {
                None => ProbeOutcome::Reachable,
                Some(f) => ProbeOutcome::Unreachable(f),
            },
            Err(e) => {
                tracing::debug!(url, "probe transport error: {}", e);
                ProbeOutcome::Unreachable(classify_curl_error(&e))
            }
        };
        tracing::debug!(url, %outcome, "probe finished");
        outcome
    }

    fn request(&self, url: &str, method: Method) -> Result<u32, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        match method {
            Method::Head => easy.nobody(true)?,
            Method::RangedGet => {
                easy.get(true)?;
                easy.range("0-0")?;
            }
        }
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut abandoned_body = false;
        let result = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if method == Method::RangedGet && !data.is_empty() {
                    // Status is known once body bytes arrive; stop the transfer.
                    abandoned_body = true;
                    return Ok(0);
                }
                Ok(data.len())
            })?;
            transfer.perform()
        };
        match result {
            Ok(()) => {}
            Err(e) if abandoned_body && e.is_write_error() => {}
            Err(e) => return Err(e),
        }

        easy.response_code()
    }
}

#[async_trait]
impl AccessibilityProbe for CurlProbe {
    async fn probe(&self, url: &ResolvedUrl) -> ProbeOutcome {
        let probe = self.clone();
        let url = url.as_str().to_string();
        match tokio::task::spawn_blocking(move || probe.probe_blocking(&url)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("probe task failed: {}", e);
                ProbeOutcome::Unreachable(ProbeFailure::Other)
            }
        }
    }
}
