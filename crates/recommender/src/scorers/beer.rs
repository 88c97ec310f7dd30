//! Beer scoring: strength filter first, then flavor overlap.
//!
//! ## Algorithm
//! 1. Parse the strength answer ("low" is served as "medium")
//! 2. Keep only beers at that strength; none left is an error
//! 3. Score each beer by how many flavor tokens its profile contains
//! 4. Highest score wins, ties go to the earlier catalog entry
//! 5. If nothing matched any flavor, the first beer at that strength wins

use crate::error::{RecommendError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlcoholLevel, AlcoholLevelFilter};
use crate::preferences::{Preferences, flavor_score};
use crate::traits::Scorer;
use catalog::CatalogItem;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct BeerScorer;

impl Scorer for BeerScorer {
    fn name(&self) -> &str {
        "BeerScorer"
    }

    fn select<'a>(
        &self,
        candidates: &[&'a CatalogItem],
        preferences: &Preferences,
    ) -> Result<&'a CatalogItem> {
        let level = AlcoholLevel::parse(&preferences.third)?;
        debug!(
            "Beer flavor preferences: {:?}, alcohol level: {}",
            preferences.flavors, level
        );

        let pipeline = FilterPipeline::new().add_filter(AlcoholLevelFilter::new(level));
        let at_level = pipeline.apply(candidates.to_vec());

        let Some(&first_at_level) = at_level.first() else {
            info!("No beers found with alcohol level: {}", level);
            return Err(RecommendError::NoBeerAtAlcoholLevel(level.to_string()));
        };

        let mut scored: Vec<(usize, &CatalogItem)> = at_level
            .iter()
            .map(|item| (flavor_score(&item.flavor_profile, &preferences.flavors), *item))
            .collect();

        // sort_by is stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        match scored.first() {
            Some(&(score, best)) if score > 0 => {
                debug!("Best beer: {} (score {})", best.name, score);
                Ok(best)
            }
            _ => {
                info!(
                    "No exact beer match found for flavors: {:?}",
                    preferences.flavors
                );
                Ok(first_at_level)
            }
        }
    }
}
