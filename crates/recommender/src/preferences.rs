//! Preferences extracted from the ordered answer list.
//!
//! Answers arrive as plain strings in question order:
//! - `answers[0]` drink category
//! - `answers[1]` comma-separated flavor selections
//! - `answers[2]` beer strength, or for wine the secondary "occasion" signal
//! - `answers[3]` occasion (used for phrasing, not for scoring)

use crate::error::{RecommendError, Result};
use catalog::DrinkCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub category: DrinkCategory,
    /// Lower-cased, trimmed, non-empty flavor tokens.
    pub flavors: Vec<String>,
    /// Lower-cased, trimmed third answer.
    pub third: String,
}

impl Preferences {
    pub fn from_answers(answers: &[String]) -> Result<Self> {
        let raw_category = answers
            .first()
            .ok_or(RecommendError::MissingAnswer { index: 0 })?;
        let category = DrinkCategory::parse(raw_category)
            .ok_or_else(|| RecommendError::InvalidCategory(raw_category.trim().to_lowercase()))?;

        let flavors = answers
            .get(1)
            .map(|raw| split_flavors(raw))
            .ok_or(RecommendError::MissingAnswer { index: 1 })?;
        let third = answers
            .get(2)
            .map(|raw| raw.trim().to_lowercase())
            .ok_or(RecommendError::MissingAnswer { index: 2 })?;

        Ok(Self {
            category,
            flavors,
            third,
        })
    }
}

/// "Fruity, Hoppy ,," -> ["fruity", "hoppy"]
pub fn split_flavors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|flavor| flavor.trim().to_lowercase())
        .filter(|flavor| !flavor.is_empty())
        .collect()
}

/// Number of flavor tokens contained in `profile` (case-insensitive).
pub fn flavor_score(profile: &str, flavors: &[String]) -> usize {
    let profile = profile.to_lowercase();
    flavors
        .iter()
        .filter(|flavor| profile.contains(flavor.as_str()))
        .count()
}
