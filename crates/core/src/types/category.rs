//! Product categories used for cost lookups.
//!
//! Catalog rows carry their category as free text. Cost tables only know the
//! five categories below; anything else (including a missing category) is
//! priced as [`Category::Smoothies`].

use serde::{Deserialize, Serialize};

/// A product category known to the cost tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Smoothies,
    Bowls,
    HighProtein,
    Bites,
    Wellness,
}

impl Category {
    /// All known categories, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Smoothies,
        Self::Bowls,
        Self::HighProtein,
        Self::Bites,
        Self::Wellness,
    ];

    /// The catalog label for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smoothies => "smoothies",
            Self::Bowls => "bowls",
            Self::HighProtein => "high-protein",
            Self::Bites => "bites",
            Self::Wellness => "wellness",
        }
    }

    /// Parse an exact catalog label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    /// Resolve an optional free-text label, falling back to the default.
    #[must_use]
    pub fn resolve(label: Option<&str>) -> Self {
        label.and_then(Self::from_label).unwrap_or_default()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_resolve_falls_back_to_smoothies() {
        assert_eq!(Category::resolve(None), Category::Smoothies);
        assert_eq!(Category::resolve(Some("juices")), Category::Smoothies);
        assert_eq!(Category::resolve(Some("Bowls")), Category::Smoothies);
        assert_eq!(Category::resolve(Some("bowls")), Category::Bowls);
        assert_eq!(Category::resolve(Some("high-protein")), Category::HighProtein);
    }
}
