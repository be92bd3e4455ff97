//! Asset reference resolution.
//!
//! Maps raw references from the content database (absolute URLs, static
//! front-end asset paths, backend upload paths, bare filenames) onto URLs a
//! page can load directly. Resolution is pure: no I/O, no shared state, and
//! every input string has a defined output.

mod optimize;
mod shape;

pub use optimize::{OptimizeOptions, DEFAULT_QUALITY};
pub use shape::{classify, PathMarkers, ReferenceShape};

use serde::Serialize;
use std::fmt;

use crate::config::AssetrefConfig;
use crate::defaults::{DefaultImageRole, DefaultImageSet};

/// File under the static prefix used when every fallback is empty.
const LAST_RESORT_FILE: &str = "placeholder.png";

/// A URL that can be used directly as a fetch/load target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedUrl(String);

impl ResolvedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ResolvedUrl> for String {
    fn from(url: ResolvedUrl) -> Self {
        url.0
    }
}

impl PartialEq<str> for ResolvedUrl {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResolvedUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Resolves asset references under a fixed configuration.
///
/// Built once from an [`AssetrefConfig`] and shared by reference; holds no
/// mutable state.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base_origin: String,
    upload_root: String,
    markers: PathMarkers,
    defaults: DefaultImageSet,
    last_resort: String,
}

impl UrlResolver {
    /// Build a resolver. Trailing `/` on the origin and upload root is dropped
    /// so joins never produce `//`.
    pub fn new(cfg: &AssetrefConfig) -> Self {
        let upload_root = cfg.upload_root.trim_end_matches('/');
        let upload_root = if upload_root.is_empty() || upload_root.starts_with('/') {
            upload_root.to_string()
        } else {
            format!("/{upload_root}")
        };
        Self {
            base_origin: cfg.base_origin.trim_end_matches('/').to_string(),
            upload_root,
            markers: PathMarkers {
                static_prefix: cfg.static_prefix.clone(),
                upload_prefix: cfg.upload_prefix.clone(),
            },
            defaults: cfg.defaults.clone(),
            last_resort: format!("{}{}", cfg.static_prefix, LAST_RESORT_FILE),
        }
    }

    pub fn base_origin(&self) -> &str {
        &self.base_origin
    }

    pub fn defaults(&self) -> &DefaultImageSet {
        &self.defaults
    }

    pub fn markers(&self) -> &PathMarkers {
        &self.markers
    }

    /// Shape of `reference` under this resolver's markers.
    pub fn classify(&self, reference: &str) -> ReferenceShape {
        classify(reference, &self.markers)
    }

    /// Resolve `reference`, falling back to the article thumbnail default
    /// when it is absent or empty.
    pub fn resolve(&self, reference: Option<&str>) -> ResolvedUrl {
        self.resolve_with_fallback(reference, self.defaults.thumbnail())
    }

    /// Resolve `reference`, falling back to `fallback` when it is absent or
    /// empty. The fallback goes through the same shape rules.
    ///
    /// # Examples
    ///
    /// With the default configuration:
    ///
    /// - `"photo.jpg"` → `"http://localhost:8000/uploads/photo.jpg"`
    /// - `"/uploads/x.jpg"` → `"http://localhost:8000/uploads/x.jpg"`
    /// - `"/assets/logo.png"` → `"/assets/logo.png"`
    /// - `"https://cdn.example.com/a.jpg"` → unchanged
    pub fn resolve_with_fallback(&self, reference: Option<&str>, fallback: &str) -> ResolvedUrl {
        match reference.filter(|r| !r.is_empty()) {
            Some(r) => self.apply_shape(r),
            None => self.resolve_fallback(fallback),
        }
    }

    /// Resolve the default image configured for `role`.
    pub fn resolve_role(&self, role: DefaultImageRole) -> ResolvedUrl {
        self.resolve_fallback(self.defaults.get(role))
    }

    /// Optimized rendition URL. Sizing is not applied yet; returns exactly
    /// what [`resolve`](Self::resolve) returns.
    pub fn get_optimized_url(
        &self,
        reference: Option<&str>,
        options: &OptimizeOptions,
    ) -> ResolvedUrl {
        tracing::trace!(
            width = ?options.width,
            height = ?options.height,
            quality = options.quality,
            "optimization options accepted but not applied"
        );
        self.resolve(reference)
    }

    /// One level only: empty fallback → thumbnail default → static placeholder.
    fn resolve_fallback(&self, fallback: &str) -> ResolvedUrl {
        let target = [fallback, self.defaults.thumbnail()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(self.last_resort.as_str());
        self.apply_shape(target)
    }

    fn apply_shape(&self, reference: &str) -> ResolvedUrl {
        let shape = self.classify(reference);
        let url = match shape {
            ReferenceShape::Absolute | ReferenceShape::StaticAsset | ReferenceShape::Opaque => {
                reference.to_string()
            }
            ReferenceShape::Upload => format!("{}{}", self.base_origin, reference),
            ReferenceShape::BareFilename => {
                format!("{}{}/{}", self.base_origin, self.upload_root, reference)
            }
            ReferenceShape::Empty => self.last_resort.clone(),
        };
        tracing::trace!(%shape, reference, resolved = %url, "resolved asset reference");
        ResolvedUrl(url)
    }
}
