//! Classify HTTP status and curl errors into probe failure causes.

use serde::Serialize;
use std::fmt;

/// Why a probe did not count as reachable.
///
/// A missing resource and an unreachable host both make a candidate
/// non-viable; the cause is kept for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "kebab-case")]
pub enum ProbeFailure {
    /// 404 or 410.
    NotFound,
    /// Any other non-success status.
    HttpStatus(u32),
    /// Connect or total timeout elapsed.
    Timeout,
    /// DNS failure, refused or reset connection, empty reply.
    Connection,
    /// URL is not absolute http(s), or libcurl rejected it.
    InvalidUrl,
    /// Relative URL (e.g. a static asset path) and no `probe.page_origin`
    /// to join it against.
    RelativeWithoutOrigin,
    /// Anything else (TLS, too many redirects, task failure).
    Other,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::NotFound => write!(f, "not found"),
            ProbeFailure::HttpStatus(code) => write!(f, "HTTP {}", code),
            ProbeFailure::Timeout => write!(f, "timed out"),
            ProbeFailure::Connection => write!(f, "connection failed"),
            ProbeFailure::InvalidUrl => write!(f, "invalid URL"),
            ProbeFailure::RelativeWithoutOrigin => {
                write!(f, "relative URL, probe.page_origin not set")
            }
            ProbeFailure::Other => write!(f, "probe failed"),
        }
    }
}

/// Classify a final HTTP status. `None` means success (2xx).
pub fn classify_http_status(code: u32) -> Option<ProbeFailure> {
    match code {
        200..=299 => None,
        404 | 410 => Some(ProbeFailure::NotFound),
        _ => Some(ProbeFailure::HttpStatus(code)),
    }
}

/// True for statuses that mean "this server does not do HEAD".
pub fn is_head_rejected(code: u32) -> bool {
    matches!(code, 405 | 501)
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> ProbeFailure {
    if e.is_operation_timedout() {
        return ProbeFailure::Timeout;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return ProbeFailure::InvalidUrl;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ProbeFailure::Connection;
    }
    ProbeFailure::Other
}
