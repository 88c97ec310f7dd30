//! Category-specific scoring strategies.

pub mod beer;
pub mod wine;

pub use beer::BeerScorer;
pub use wine::WineScorer;
