//! Wine scoring: flavor overlap first, occasion match as the tie-breaker.
//!
//! The secondary signal is the third recorded answer. It is compared against
//! each wine's `occasion` text by substring.

use crate::error::{RecommendError, Result};
use crate::preferences::{Preferences, flavor_score};
use crate::traits::Scorer;
use catalog::CatalogItem;
use std::cmp::Reverse;
use tracing::{debug, info};

/// Scores wines by `(flavor_score, occasion_match)`.
///
/// `pinned` holds names that always win when present among the candidates
/// (exact, case-insensitive). It is empty unless configured.
#[derive(Debug, Clone, Default)]
pub struct WineScorer {
    pinned: Vec<String>,
}

impl WineScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pinned<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pinned = names
            .into_iter()
            .map(|name| name.into().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        self
    }

    fn pinned_candidate<'a>(&self, candidates: &[&'a CatalogItem]) -> Option<&'a CatalogItem> {
        if self.pinned.is_empty() {
            return None;
        }
        candidates
            .iter()
            .copied()
            .find(|item| self.pinned.contains(&item.name.trim().to_lowercase()))
    }
}

/// (flavor score, occasion match) for one wine.
pub fn score_wine(item: &CatalogItem, preferences: &Preferences) -> (usize, bool) {
    if item.flavor_profile.is_empty() {
        debug!("Missing 'flavor_profile' for drink: {}", item.name);
    }
    let flavor = flavor_score(&item.flavor_profile, &preferences.flavors);
    let occasion = !preferences.third.is_empty()
        && item.occasion.to_lowercase().contains(&preferences.third);
    (flavor, occasion)
}

impl Scorer for WineScorer {
    fn name(&self) -> &str {
        "WineScorer"
    }

    fn select<'a>(
        &self,
        candidates: &[&'a CatalogItem],
        preferences: &Preferences,
    ) -> Result<&'a CatalogItem> {
        debug!(
            "Wine flavor preferences: {:?}, occasion: {}",
            preferences.flavors, preferences.third
        );

        if let Some(pinned) = self.pinned_candidate(candidates) {
            info!("{} is pinned as the {} recommendation", pinned.name, preferences.category);
            return Ok(pinned);
        }

        let mut scored: Vec<((usize, bool), &CatalogItem)> = candidates
            .iter()
            .map(|item| (score_wine(item, preferences), *item))
            .collect();

        // Stable sort: equal keys keep catalog order
        scored.sort_by_key(|(score, _)| Reverse(*score));

        debug!(
            "Sorted wine recommendations: {:?}",
            scored.iter().map(|(_, item)| item.name.as_str()).collect::<Vec<_>>()
        );

        scored
            .first()
            .map(|(_, item)| *item)
            .ok_or(RecommendError::NoWineMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::DrinkCategory;

    fn prefs(flavors: &[&str], third: &str) -> Preferences {
        Preferences {
            category: DrinkCategory::RedWine,
            flavors: flavors.iter().map(|s| s.to_string()).collect(),
            third: third.to_string(),
        }
    }

    #[test]
    fn test_flavor_and_occasion_beats_flavor_only() {
        let items = vec![
            CatalogItem::new("Flavor Only", "red wine")
                .with_flavor("spicy, earthy")
                .with_occasion("dinner"),
            CatalogItem::new("Both", "red wine")
                .with_flavor("spicy, oaked")
                .with_occasion("BBQ, celebration"),
        ];
        let candidates: Vec<_> = items.iter().collect();

        let best = WineScorer::new()
            .select(&candidates, &prefs(&["spicy"], "bbq"))
            .unwrap();
        assert_eq!(best.name, "Both");
    }

    #[test]
    fn test_flavor_score_dominates_occasion() {
        let items = vec![
            CatalogItem::new("Occasion Only", "red wine")
                .with_flavor("tannic")
                .with_occasion("bbq"),
            CatalogItem::new("Two Flavors", "red wine").with_flavor("fruity, spicy"),
        ];
        let candidates: Vec<_> = items.iter().collect();

        let best = WineScorer::new()
            .select(&candidates, &prefs(&["fruity", "spicy"], "bbq"))
            .unwrap();
        assert_eq!(best.name, "Two Flavors");
    }

    #[test]
    fn test_all_zero_returns_first_candidate() {
        let items = vec![
            CatalogItem::new("First", "white wine"),
            CatalogItem::new("Second", "white wine"),
        ];
        let candidates: Vec<_> = items.iter().collect();

        let best = WineScorer::new()
            .select(&candidates, &prefs(&["buttery"], "medium"))
            .unwrap();
        assert_eq!(best.name, "First");
    }

    #[test]
    fn test_empty_candidates_is_no_wine_match() {
        let result = WineScorer::new().select(&[], &prefs(&["fruity"], "low"));
        assert_eq!(result, Err(RecommendError::NoWineMatch));
    }

    #[test]
    fn test_pins_are_inert_by_default() {
        let items = vec![
            CatalogItem::new("Leva Riesling", "white wine"),
            CatalogItem::new("Floral Blend", "white wine").with_flavor("floral"),
        ];
        let candidates: Vec<_> = items.iter().collect();

        let best = WineScorer::new()
            .select(&candidates, &prefs(&["floral"], "low"))
            .unwrap();
        assert_eq!(best.name, "Floral Blend");
    }

    #[test]
    fn test_pinned_name_matches_case_insensitively() {
        let items = vec![
            CatalogItem::new("Floral Blend", "white wine").with_flavor("floral"),
            CatalogItem::new("leva riesling", "white wine"),
        ];
        let candidates: Vec<_> = items.iter().collect();

        let scorer = WineScorer::new().with_pinned(["Leva Riesling"]);
        let best = scorer.select(&candidates, &prefs(&["floral"], "low")).unwrap();
        assert_eq!(best.name, "leva riesling");
    }
}
