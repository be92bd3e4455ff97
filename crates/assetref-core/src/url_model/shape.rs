//! Classification of raw asset references by path shape.

use serde::Serialize;

/// Prefixes that distinguish bundled front-end assets from backend uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMarkers {
    pub static_prefix: String,
    pub upload_prefix: String,
}

impl Default for PathMarkers {
    fn default() -> Self {
        Self {
            static_prefix: "/assets/".to_string(),
            upload_prefix: "/uploads/".to_string(),
        }
    }
}

/// Shape of an asset reference, in the order the resolver tests them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceShape {
    /// Empty string; the fallback is used instead.
    Empty,
    /// Starts with `http://` or `https://`.
    Absolute,
    /// Bundled front-end asset, served by the page origin.
    StaticAsset,
    /// Backend-managed upload path.
    Upload,
    /// No path separator at all.
    BareFilename,
    /// Any other relative path; passed through.
    Opaque,
}

impl ReferenceShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceShape::Empty => "empty",
            ReferenceShape::Absolute => "absolute",
            ReferenceShape::StaticAsset => "static-asset",
            ReferenceShape::Upload => "upload",
            ReferenceShape::BareFilename => "bare-filename",
            ReferenceShape::Opaque => "opaque",
        }
    }
}

impl std::fmt::Display for ReferenceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn is_absolute_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Classifies `reference`; first matching rule wins.
pub fn classify(reference: &str, markers: &PathMarkers) -> ReferenceShape {
    if reference.is_empty() {
        ReferenceShape::Empty
    } else if is_absolute_url(reference) {
        ReferenceShape::Absolute
    } else if reference.starts_with(&markers.static_prefix) {
        ReferenceShape::StaticAsset
    } else if reference.starts_with(&markers.upload_prefix) {
        ReferenceShape::Upload
    } else if !reference.contains('/') {
        ReferenceShape::BareFilename
    } else {
        ReferenceShape::Opaque
    }
}
