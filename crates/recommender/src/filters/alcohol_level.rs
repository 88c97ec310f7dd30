//! Filter beers by the strength the user asked for.
//!
//! The catalog has no true "low" tier for beer, so a "low" answer is served
//! from the "medium" shelf.

use crate::error::{RecommendError, Result};
use crate::traits::Filter;
use catalog::CatalogItem;
use tracing::info;

/// Normalized strength preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlcoholLevel {
    Medium,
    High,
    NonAlcoholic,
}

impl AlcoholLevel {
    /// Parse a lower- or mixed-case answer. "low" maps to `Medium`.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => {
                info!("User selected 'low', defaulting to 'medium'");
                Ok(Self::Medium)
            }
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "non-alcoholic" => Ok(Self::NonAlcoholic),
            other => Err(RecommendError::InvalidAlcoholLevel(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
            Self::NonAlcoholic => "non-alcoholic",
        }
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        let level = item.level.to_lowercase();
        match self {
            Self::Medium | Self::High => level == self.as_str(),
            Self::NonAlcoholic => level == "0" || item.alcohol_content == Some(0.0),
        }
    }
}

impl std::fmt::Display for AlcoholLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps items whose strength matches the requested level.
pub struct AlcoholLevelFilter {
    level: AlcoholLevel,
}

impl AlcoholLevelFilter {
    pub fn new(level: AlcoholLevel) -> Self {
        Self { level }
    }
}

impl Filter for AlcoholLevelFilter {
    fn name(&self) -> &str {
        "AlcoholLevelFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem> {
        candidates
            .into_iter()
            .filter(|item| self.level.matches(item))
            .collect()
    }
}
