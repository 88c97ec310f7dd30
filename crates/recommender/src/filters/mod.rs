//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod alcohol_level;
pub mod category;

// Re-export for convenience
pub use alcohol_level::{AlcoholLevel, AlcoholLevelFilter};
pub use category::CategoryFilter;
