//! Deterministic drink recommendation over the loaded catalogs.
//!
//! This crate provides:
//! - Filter trait and implementations (category, alcohol level)
//! - FilterPipeline for composing filters
//! - Scorer trait with beer and wine strategies
//! - RecommendationEngine, which picks one primary and one vendor drink
//!
//! ## Architecture
//! The engine processes answers in stages:
//! 1. Answers are parsed into `Preferences`
//! 2. Each catalog is narrowed to the chosen category
//! 3. The category's scorer picks a winner per catalog
//! 4. The caller's `SidePolicy` decides whether a failed side is an error
//!    or a warning
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{Outcome, RecommendationEngine, SidePolicy};
//!
//! let engine = RecommendationEngine::new(catalogs.clone());
//! let answers = vec!["Beer".into(), "Fruity, Sour, Light".into(), "Low".into(), "BBQ".into()];
//! match engine.recommend(&answers, SidePolicy::default())? {
//!     Outcome::Recommended(rec) => println!("{} / {}", rec.primary.name, rec.vendor.name),
//!     Outcome::Warning(message) => println!("{}", message),
//! }
//! ```

pub mod engine;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod preferences;
pub mod scorers;
pub mod traits;

// Re-export main types
pub use engine::{Outcome, Recommendation, RecommendationEngine, Severity, SidePolicy};
pub use error::RecommendError;
pub use filter_pipeline::FilterPipeline;
pub use preferences::Preferences;
pub use scorers::{BeerScorer, WineScorer};
pub use traits::{Filter, Scorer};
