//! Error types for the recommendation engine.

use catalog::CatalogKind;
use thiserror::Error;

/// Domain errors raised while turning answers into a recommendation.
///
/// The messages are user-facing: the API sends them back verbatim in the
/// `response` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Invalid category preference '{0}'. Only beer, red wine, and white wine are supported.")]
    InvalidCategory(String),

    #[error("No drinks found in category '{0}'.")]
    NoDrinksInCategory(String),

    #[error("Invalid alcohol level selected: '{0}'.")]
    InvalidAlcoholLevel(String),

    #[error("No beers found with alcohol level '{0}'.")]
    NoBeerAtAlcoholLevel(String),

    #[error("No matching wine found.")]
    NoWineMatch,

    /// One side's catalog has nothing to offer for the category.
    #[error("No matching drink found in {}.", no_match_place(*.0))]
    NoMatchInCatalog(CatalogKind),

    #[error("Missing answer to question {index}.")]
    MissingAnswer { index: usize },
}

pub type Result<T> = std::result::Result<T, RecommendError>;

fn no_match_place(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Primary => "the main dictionary",
        CatalogKind::Vendor => "systembolaget",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_wording_per_catalog() {
        assert_eq!(
            RecommendError::NoMatchInCatalog(CatalogKind::Primary).to_string(),
            "No matching drink found in the main dictionary."
        );
        assert_eq!(
            RecommendError::NoMatchInCatalog(CatalogKind::Vendor).to_string(),
            "No matching drink found in systembolaget."
        );
    }
}
