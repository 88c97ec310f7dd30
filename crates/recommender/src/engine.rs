//! # Recommendation Engine
//!
//! Turns the ordered answer list into one primary and one vendor pick:
//! 1. Parse preferences (category, flavors, third answer)
//! 2. Restrict both catalogs to the category
//! 3. Run the category's scorer on each side independently
//! 4. Apply the per-side failure policy
//!
//! The two sides may pick different drinks: each catalog is scored on its
//! own subset.

use std::str::FromStr;
use std::sync::Arc;

use catalog::{CatalogItem, CatalogKind, Catalogs, DrinkCategory};
use tracing::{debug, error, warn};

use crate::error::{RecommendError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::CategoryFilter;
use crate::preferences::Preferences;
use crate::scorers::{BeerScorer, WineScorer};
use crate::traits::Scorer;

/// How a failure on one catalog side is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Abort the whole recommendation.
    #[default]
    Error,
    /// Report an informational message instead of a recommendation.
    Warning,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            other => Err(format!("unknown severity '{}', expected 'error' or 'warning'", other)),
        }
    }
}

/// Per-side failure policy, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidePolicy {
    pub primary: Severity,
    pub vendor: Severity,
}

impl SidePolicy {
    pub fn new(primary: Severity, vendor: Severity) -> Self {
        Self { primary, vendor }
    }

    pub fn severity(&self, kind: CatalogKind) -> Severity {
        match kind {
            CatalogKind::Primary => self.primary,
            CatalogKind::Vendor => self.vendor,
        }
    }
}

/// One pick from each catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub primary: CatalogItem,
    pub vendor: CatalogItem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Recommended(Recommendation),
    /// A side failed under `Severity::Warning`; the message is user-facing.
    Warning(String),
}

/// Main entry point for scoring.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalogs: Arc<Catalogs>,
    beer: BeerScorer,
    wine: WineScorer,
}

impl RecommendationEngine {
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self {
            catalogs,
            beer: BeerScorer,
            wine: WineScorer::new(),
        }
    }

    /// Replace the wine scorer (e.g. to configure pinned wines).
    pub fn with_wine_scorer(mut self, wine: WineScorer) -> Self {
        self.wine = wine;
        self
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Recommend one drink per catalog for the given answers.
    pub fn recommend(&self, answers: &[String], policy: SidePolicy) -> Result<Outcome> {
        let preferences = Preferences::from_answers(answers)?;
        debug!("User's category preference: {}", preferences.category);

        let primary = self.candidates(CatalogKind::Primary, preferences.category);
        let vendor = self.candidates(CatalogKind::Vendor, preferences.category);

        if primary.is_empty() && vendor.is_empty() {
            error!("No drinks found for category: {}", preferences.category);
            return Err(RecommendError::NoDrinksInCategory(
                preferences.category.to_string(),
            ));
        }

        let scorer = self.scorer_for(preferences.category);
        let primary_pick = Self::select_side(scorer, CatalogKind::Primary, &primary, &preferences);
        let vendor_pick = Self::select_side(scorer, CatalogKind::Vendor, &vendor, &preferences);

        let mut warnings = Vec::new();
        let mut picks = Vec::with_capacity(2);
        for (kind, pick) in [
            (CatalogKind::Primary, primary_pick),
            (CatalogKind::Vendor, vendor_pick),
        ] {
            match pick {
                Ok(item) => picks.push(item),
                Err(e) => match policy.severity(kind) {
                    Severity::Error => return Err(e),
                    Severity::Warning => {
                        warn!("Downgrading {} failure to a warning: {}", kind, e);
                        warnings.push(e.to_string());
                    }
                },
            }
        }

        if let Some(message) = warnings.into_iter().next() {
            return Ok(Outcome::Warning(message));
        }

        match picks.as_slice() {
            [primary, vendor] => Ok(Outcome::Recommended(Recommendation {
                primary: (*primary).clone(),
                vendor: (*vendor).clone(),
            })),
            _ => Err(RecommendError::NoDrinksInCategory(
                preferences.category.to_string(),
            )),
        }
    }

    fn candidates(&self, kind: CatalogKind, category: DrinkCategory) -> Vec<&CatalogItem> {
        let pipeline = FilterPipeline::new().add_filter(CategoryFilter::new(category));
        let filtered = pipeline.apply(self.catalogs.get(kind).iter().collect());
        if filtered.is_empty() {
            error!("No drinks found for category {} in {} catalog", category, kind);
        }
        filtered
    }

    fn scorer_for(&self, category: DrinkCategory) -> &dyn Scorer {
        if category.is_wine() {
            &self.wine
        } else {
            &self.beer
        }
    }

    fn select_side<'a>(
        scorer: &dyn Scorer,
        kind: CatalogKind,
        candidates: &[&'a CatalogItem],
        preferences: &Preferences,
    ) -> Result<&'a CatalogItem> {
        if candidates.is_empty() {
            return Err(RecommendError::NoMatchInCatalog(kind));
        }
        let pick = scorer.select(candidates, preferences)?;
        debug!("{} picked {} from the {} catalog", scorer.name(), pick.name, kind);
        Ok(pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn engine(primary: Vec<CatalogItem>, vendor: Vec<CatalogItem>) -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(Catalogs::new(primary, vendor)))
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_sides_are_scored_independently() {
        let engine = engine(
            vec![
                CatalogItem::new("House Lager", "beer").with_level("medium").with_flavor("light"),
                CatalogItem::new("House IPA", "beer").with_level("medium").with_flavor("fruity"),
            ],
            vec![CatalogItem::new("Retail Pils", "Beer").with_level("medium").with_flavor("crisp")],
        );

        let outcome = engine
            .recommend(&answers(&["Beer", "Fruity", "Medium", "BBQ"]), SidePolicy::default())
            .unwrap();

        let Outcome::Recommended(rec) = outcome else {
            panic!("expected a recommendation");
        };
        assert_eq!(rec.primary.name, "House IPA");
        assert_eq!(rec.vendor.name, "Retail Pils");
    }

    #[test]
    fn test_no_drinks_in_category() {
        let engine = engine(vec![CatalogItem::new("Lager", "beer")], vec![]);

        let result = engine.recommend(
            &answers(&["Red Wine", "Fruity", "Gathering", "BBQ"]),
            SidePolicy::default(),
        );
        assert_eq!(result, Err(RecommendError::NoDrinksInCategory("red wine".into())));
    }

    #[test]
    fn test_invalid_category_is_always_hard() {
        let engine = engine(vec![], vec![]);
        let policy = SidePolicy::new(Severity::Warning, Severity::Warning);

        let result = engine.recommend(&answers(&["Mead", "Sweet", "High", "BBQ"]), policy);
        assert_eq!(result, Err(RecommendError::InvalidCategory("mead".into())));
    }

    #[test]
    fn test_missing_side_respects_policy() {
        let engine = engine(
            vec![CatalogItem::new("Chablis", "white wine").with_flavor("mineral")],
            vec![],
        );
        let answers = answers(&["White Wine", "Mineral", "Low", "By the sea"]);

        let hard = engine.recommend(&answers, SidePolicy::default());
        assert_eq!(hard, Err(RecommendError::NoMatchInCatalog(CatalogKind::Vendor)));

        let soft = engine
            .recommend(&answers, SidePolicy::new(Severity::Error, Severity::Warning))
            .unwrap();
        assert_eq!(soft, Outcome::Warning("No matching drink found in systembolaget.".into()));
    }

    #[test]
    fn test_scorer_failure_respects_policy() {
        let engine = engine(
            vec![CatalogItem::new("Lager", "beer").with_level("medium")],
            vec![CatalogItem::new("Stout", "beer").with_level("high")],
        );
        let answers = answers(&["Beer", "Dark", "High", "Night in"]);

        let hard = engine.recommend(&answers, SidePolicy::default());
        assert_eq!(hard, Err(RecommendError::NoBeerAtAlcoholLevel("high".into())));

        let soft = engine
            .recommend(&answers, SidePolicy::new(Severity::Warning, Severity::Error))
            .unwrap();
        assert!(matches!(soft, Outcome::Warning(msg) if msg.contains("high")));
    }
}
