//! Sizing/quality options for optimized image URLs.

/// Default JPEG/WebP quality when none is requested.
pub const DEFAULT_QUALITY: u8 = 80;

/// Requested rendition of an image. Accepted by
/// [`UrlResolver::get_optimized_url`](super::UrlResolver::get_optimized_url)
/// but not yet applied to the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: u8,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl OptimizeOptions {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }
}
