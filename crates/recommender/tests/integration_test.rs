//! Integration tests for the recommendation engine.
//!
//! These tests parse catalogs from JSON the way the server loads them and
//! run complete answer sets through the engine.

use catalog::parser::parse_catalog_str;
use catalog::{CatalogKind, Catalogs};
use recommender::{
    Outcome, RecommendError, RecommendationEngine, Severity, SidePolicy, WineScorer,
};
use std::sync::Arc;

const MAIN_DRINKS: &str = r#"[
    {"Style_Name": "Hazy IPA", "category": "Beer", "flavor_profile": "Fruity, hoppy, juicy",
     "level": "medium", "alcohol_content": 6.0, "pairing": "Tacos", "occasion": "BBQ, gathering",
     "description": "Soft and tropical"},
    {"Style_Name": "Baltic Porter", "category": "Beer", "flavor_profile": "Dark, malty, roasted",
     "level": "high", "alcohol_content": 8.5, "pairing": "Chocolate", "occasion": "Night in",
     "description": "Deep and warming"},
    {"Style_Name": "Zero Lager", "category": "Beer", "flavor_profile": "Light, crisp",
     "level": "0", "alcohol_content": 0.0, "pairing": "Salads", "occasion": "Gathering",
     "description": "All the taste, none of the alcohol"},
    {"Style_Name": "Piemonte Barbera", "category": "Red Wine", "flavor_profile": "Fruity, acidic",
     "level": "medium", "pairing": "Pizza", "occasion": "Night in", "description": "Bright red"},
    {"Style_Name": "Rioja Reserva", "category": "Red Wine", "flavor_profile": "Oaked, fruity, spicy",
     "level": "high", "pairing": "Lamb", "occasion": "Celebration, BBQ", "description": "Classic"},
    {"Style_Name": "Leva Riesling", "category": "White Wine", "flavor_profile": "Floral, mineral",
     "level": "low", "pairing": "Sushi", "occasion": "By the sea", "description": "Off-dry"}
]"#;

const VENDOR_DRINKS: &str = r#"[
    {"Style_Name": "Retail Pale Ale", "category": "beer", "flavor_profile": "Hoppy, citrus",
     "level": "medium", "alcohol_content": 5.0},
    {"Style_Name": "Retail Imperial Stout", "category": "beer", "flavor_profile": "Dark, coffee",
     "level": "high", "alcohol_content": 10.0},
    {"Style_Name": "Retail Alcohol Free", "category": "beer", "flavor_profile": "Light",
     "level": "none", "alcohol_content": 0.0},
    {"Style_Name": "Retail Zinfandel", "category": "red wine", "flavor_profile": "Jammy, spicy",
     "occasion": "bbq"}
]"#;

fn engine() -> RecommendationEngine {
    let primary = parse_catalog_str(MAIN_DRINKS, "main").unwrap();
    let vendor = parse_catalog_str(VENDOR_DRINKS, "vendor").unwrap();
    RecommendationEngine::new(Arc::new(Catalogs::new(primary, vendor)))
}

fn answers(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn recommended(outcome: Outcome) -> (String, String) {
    match outcome {
        Outcome::Recommended(rec) => (rec.primary.name, rec.vendor.name),
        Outcome::Warning(message) => panic!("unexpected warning: {}", message),
    }
}

#[test]
fn test_beer_flow_end_to_end() {
    let outcome = engine()
        .recommend(&answers(&["Beer", "Fruity, Light, Sour", "Medium", "BBQ"]), SidePolicy::default())
        .unwrap();

    assert_eq!(
        recommended(outcome),
        ("Hazy IPA".to_string(), "Retail Pale Ale".to_string())
    );
}

#[test]
fn test_low_and_medium_give_the_same_beers() {
    let engine = engine();
    let low = engine
        .recommend(&answers(&["Beer", "Dark, Malty, Sour", "Low", "Night in"]), SidePolicy::default())
        .unwrap();
    let medium = engine
        .recommend(&answers(&["Beer", "Dark, Malty, Sour", "Medium", "Night in"]), SidePolicy::default())
        .unwrap();

    assert_eq!(low, medium);
}

#[test]
fn test_non_alcoholic_beer_on_both_sides() {
    let outcome = engine()
        .recommend(&answers(&["beer", "Light", "Non-alcoholic", "Gathering"]), SidePolicy::default())
        .unwrap();

    assert_eq!(
        recommended(outcome),
        ("Zero Lager".to_string(), "Retail Alcohol Free".to_string())
    );
}

#[test]
fn test_red_wine_uses_flavor_then_occasion() {
    let outcome = engine()
        .recommend(&answers(&["Red Wine", "Fruity, Spicy, Earthy", "BBQ", "BBQ"]), SidePolicy::default())
        .unwrap();

    assert_eq!(
        recommended(outcome),
        ("Rioja Reserva".to_string(), "Retail Zinfandel".to_string())
    );
}

#[test]
fn test_white_wine_missing_on_vendor_side() {
    let engine = engine();
    let answers = answers(&["White Wine", "Floral, Mineral, Fruity", "Low", "By the sea"]);

    let hard = engine.recommend(&answers, SidePolicy::default());
    assert_eq!(hard, Err(RecommendError::NoMatchInCatalog(CatalogKind::Vendor)));

    let soft = engine
        .recommend(&answers, SidePolicy::new(Severity::Error, Severity::Warning))
        .unwrap();
    assert!(matches!(soft, Outcome::Warning(_)));
}

#[test]
fn test_pinned_wine_overrides_scoring() {
    let engine = engine().with_wine_scorer(WineScorer::new().with_pinned(["piemonte barbera"]));

    let outcome = engine
        .recommend(&answers(&["Red Wine", "Oaked, Spicy", "BBQ", "BBQ"]), SidePolicy::default())
        .unwrap();

    let (primary, vendor) = recommended(outcome);
    assert_eq!(primary, "Piemonte Barbera");
    assert_eq!(vendor, "Retail Zinfandel");
}

#[test]
fn test_empty_catalogs_report_no_drinks() {
    let engine = RecommendationEngine::new(Arc::new(Catalogs::default()));

    let result = engine.recommend(&answers(&["Beer", "Light", "High", "BBQ"]), SidePolicy::default());
    assert_eq!(result, Err(RecommendError::NoDrinksInCategory("beer".into())));
}
