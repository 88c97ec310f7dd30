//! Core traits for the recommendation pipeline.
//!
//! - `Filter` narrows a candidate list (category, alcohol level)
//! - `Scorer` picks a single winner from a filtered candidate list

use crate::error::Result;
use crate::preferences::Preferences;
use catalog::CatalogItem;

/// Core trait for filtering catalog items.
///
/// Filters work on borrowed items: catalogs are loaded once and shared, so
/// candidates are references into them rather than clones.
/// Filters must keep the relative order of the items they retain; scorers
/// rely on catalog order for tie-breaking.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    fn apply<'a>(&self, candidates: Vec<&'a CatalogItem>) -> Vec<&'a CatalogItem>;
}

/// Picks the best item for the user's preferences.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &str;

    /// Select a winner from `candidates`, which are already restricted to
    /// the user's category and kept in catalog order.
    fn select<'a>(
        &self,
        candidates: &[&'a CatalogItem],
        preferences: &Preferences,
    ) -> Result<&'a CatalogItem>;
}
