//! Core domain types for the drink catalogs.
//!
//! Field names on the wire follow the JSON files the bar staff maintain
//! (`Style_Name`, `flavor_profile`, `Image_Icon`, ...). The same names are
//! used when items are serialized back out through the API.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Drink categories
// =============================================================================

/// The three drink categories the questionnaire supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrinkCategory {
    Beer,
    RedWine,
    WhiteWine,
}

impl DrinkCategory {
    pub const ALL: [DrinkCategory; 3] = [Self::Beer, Self::RedWine, Self::WhiteWine];

    /// Parse a free-form answer ("Beer", " red wine ") into a category.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beer" => Some(Self::Beer),
            "red wine" => Some(Self::RedWine),
            "white wine" => Some(Self::WhiteWine),
            _ => None,
        }
    }

    /// Lower-case label as stored in the catalog `category` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beer => "beer",
            Self::RedWine => "red wine",
            Self::WhiteWine => "white wine",
        }
    }

    pub fn is_wine(&self) -> bool {
        matches!(self, Self::RedWine | Self::WhiteWine)
    }
}

impl std::fmt::Display for DrinkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Catalog items
// =============================================================================

/// A single drink record.
///
/// `name` is validated non-empty at load time; everything else is optional
/// in the source files and defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "Style_Name")]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub flavor_profile: String,
    /// "low" | "medium" | "high" | "0". Some files store the level as a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub level: String,
    #[serde(
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub alcohol_content: Option<f64>,
    #[serde(default)]
    pub pairing: String,
    #[serde(default)]
    pub occasion: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "Image_name", default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(rename = "Image_Icon", default, skip_serializing_if = "Option::is_none")]
    pub image_icon: Option<String>,
}

impl CatalogItem {
    /// Minimal item, mostly useful for tests and fixtures.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            flavor_profile: String::new(),
            level: String::new(),
            alcohol_content: None,
            pairing: String::new(),
            occasion: String::new(),
            description: String::new(),
            image_name: None,
            image_icon: None,
        }
    }

    pub fn with_flavor(mut self, flavor_profile: impl Into<String>) -> Self {
        self.flavor_profile = flavor_profile.into();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_alcohol_content(mut self, alcohol_content: f64) -> Self {
        self.alcohol_content = Some(alcohol_content);
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = occasion.into();
        self
    }

    /// Exact case-insensitive category comparison.
    pub fn is_in_category(&self, category: DrinkCategory) -> bool {
        self.category.to_lowercase() == category.as_str()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Other(serde_json::Value),
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Other(_) => String::new(),
    })
}

fn optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Int(i) => Some(i as f64),
        Scalar::Float(f) => Some(f),
        Scalar::Text(_) | Scalar::Other(_) => None,
    })
}

// =============================================================================
// Catalog pair
// =============================================================================

/// Which of the two catalogs an item (or a failure) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// The in-house menu.
    Primary,
    /// The external retailer's range.
    Vendor,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => f.write_str("main"),
            Self::Vendor => f.write_str("systembolaget"),
        }
    }
}

/// Both catalogs, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub primary: Vec<CatalogItem>,
    pub vendor: Vec<CatalogItem>,
}

impl Catalogs {
    pub fn new(primary: Vec<CatalogItem>, vendor: Vec<CatalogItem>) -> Self {
        Self { primary, vendor }
    }

    pub fn get(&self, kind: CatalogKind) -> &[CatalogItem] {
        match kind {
            CatalogKind::Primary => &self.primary,
            CatalogKind::Vendor => &self.vendor,
        }
    }

    /// (primary, vendor) item counts for logging and health checks.
    pub fn counts(&self) -> (usize, usize) {
        (self.primary.len(), self.vendor.len())
    }
}
