//! Named default images used as terminal fallbacks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic role of a default image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultImageRole {
    BlogBanner,
    HeroBanner,
    ArticleThumbnail,
    BuildingLibrary,
}

impl DefaultImageRole {
    pub const ALL: [DefaultImageRole; 4] = [
        DefaultImageRole::BlogBanner,
        DefaultImageRole::HeroBanner,
        DefaultImageRole::ArticleThumbnail,
        DefaultImageRole::BuildingLibrary,
    ];

    /// Kebab-case name, as accepted by `FromStr` and printed by the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            DefaultImageRole::BlogBanner => "blog-banner",
            DefaultImageRole::HeroBanner => "hero-banner",
            DefaultImageRole::ArticleThumbnail => "article-thumbnail",
            DefaultImageRole::BuildingLibrary => "building-library",
        }
    }
}

impl fmt::Display for DefaultImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown default image role: {0:?} (expected one of blog-banner, hero-banner, article-thumbnail, building-library)")]
pub struct UnknownRole(pub String);

impl FromStr for DefaultImageRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "blog-banner" | "banner" => Ok(DefaultImageRole::BlogBanner),
            "hero-banner" | "hero" => Ok(DefaultImageRole::HeroBanner),
            "article-thumbnail" | "thumbnail" => Ok(DefaultImageRole::ArticleThumbnail),
            "building-library" | "library-cover" | "library" => {
                Ok(DefaultImageRole::BuildingLibrary)
            }
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Fixed role → asset reference mapping (`[defaults]` section in config.toml).
///
/// Values are upload-relative paths; they still go through the resolver's
/// shape rules before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultImageSet {
    pub blog_banner: String,
    pub hero_banner: String,
    pub article_thumbnail: String,
    pub building_library: String,
}

impl Default for DefaultImageSet {
    fn default() -> Self {
        Self {
            blog_banner: "/uploads/1758873063_a-book-1760998_1280.jpg".to_string(),
            hero_banner: "/uploads/1758801057_a-book-759873_640.jpg".to_string(),
            article_thumbnail: "/uploads/1758801057_book-419589_640.jpg".to_string(),
            building_library: "/uploads/1758779936_a-book-1760998_1280.jpg".to_string(),
        }
    }
}

impl DefaultImageSet {
    pub fn get(&self, role: DefaultImageRole) -> &str {
        match role {
            DefaultImageRole::BlogBanner => &self.blog_banner,
            DefaultImageRole::HeroBanner => &self.hero_banner,
            DefaultImageRole::ArticleThumbnail => &self.article_thumbnail,
            DefaultImageRole::BuildingLibrary => &self.building_library,
        }
    }

    /// The default used when a caller does not name a fallback.
    pub fn thumbnail(&self) -> &str {
        &self.article_thumbnail
    }

    /// Iterate `(role, reference)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (DefaultImageRole, &str)> {
        DefaultImageRole::ALL
            .into_iter()
            .map(move |role| (role, self.get(role)))
    }
}
