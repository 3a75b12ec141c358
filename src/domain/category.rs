//! Tour categories and their presentation capabilities.
//!
//! The category set is open: the catalog API may send categories this crate
//! does not know yet, and those are carried through verbatim as `Other`.

use serde::{Deserialize, Serialize};

/// Tour category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TourCategory {
    Cultural,
    Adventure,
    Spiritual,
    Luxury,
    Festival,
    Custom,
    Trekking,
    Wellness,
    Other(String),
}

impl TourCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cultural => "Cultural",
            Self::Adventure => "Adventure",
            Self::Spiritual => "Spiritual",
            Self::Luxury => "Luxury",
            Self::Festival => "Festival",
            Self::Custom => "Custom",
            Self::Trekking => "Trekking",
            Self::Wellness => "Wellness",
            Self::Other(name) => name,
        }
    }

    /// Case-insensitive comparison, used for category scoping of listings.
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name.trim())
    }

    /// Badge color and icon for this category.
    ///
    /// This is the single lookup table for category presentation; pages must
    /// not keep their own copies.
    pub fn style(&self) -> CategoryStyle {
        match self {
            Self::Cultural => CategoryStyle::new("amber", "landmark"),
            Self::Adventure => CategoryStyle::new("emerald", "mountain"),
            Self::Spiritual => CategoryStyle::new("violet", "sparkles"),
            Self::Luxury => CategoryStyle::new("gold", "crown"),
            Self::Festival => CategoryStyle::new("rose", "calendar"),
            Self::Custom => CategoryStyle::new("sky", "compass"),
            Self::Trekking => CategoryStyle::new("green", "footprints"),
            Self::Wellness => CategoryStyle::new("teal", "leaf"),
            Self::Other(_) => CategoryStyle::new("slate", "map"),
        }
    }
}

impl From<String> for TourCategory {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cultural" | "culture" => Self::Cultural,
            "adventure" => Self::Adventure,
            "spiritual" => Self::Spiritual,
            "luxury" => Self::Luxury,
            "festival" => Self::Festival,
            "custom" => Self::Custom,
            "trekking" => Self::Trekking,
            "wellness" => Self::Wellness,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for TourCategory {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TourCategory> for String {
    fn from(c: TourCategory) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for TourCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation capabilities attached to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStyle {
    pub badge_color: &'static str,
    pub icon: &'static str,
}

impl CategoryStyle {
    const fn new(badge_color: &'static str, icon: &'static str) -> Self {
        Self { badge_color, icon }
    }
}
