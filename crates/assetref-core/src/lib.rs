//! Resolution of media asset references into fetchable URLs, with
//! reachability probing and graceful fallback.

pub mod config;
pub mod defaults;
pub mod load_error;
pub mod logging;
pub mod probe;
pub mod selector;
pub mod url_model;

pub use config::AssetrefConfig;
pub use defaults::{DefaultImageRole, DefaultImageSet};
pub use load_error::{
    attach_load_error_handler, Disposition, HandlerState, ImageSurface, LoadErrorHandler,
    RenderSurface,
};
pub use probe::{AccessibilityProbe, CurlProbe, ProbeFailure, ProbeOutcome};
pub use selector::{FallbackSelector, ProbeAttempt, SelectionReport, SelectionSource};
pub use url_model::{OptimizeOptions, ResolvedUrl, UrlResolver};
