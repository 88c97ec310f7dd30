//! # Catalog Crate
//!
//! This crate loads the two drink catalogs the bartender recommends from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogItem, DrinkCategory, Catalogs)
//! - **parser**: Parse catalog JSON into Rust structs, validating each record
//! - **loader**: Fail-soft loading of both catalogs at startup
//! - **error**: Error types for catalog parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalogs;
//! use std::path::Path;
//!
//! let catalogs = Catalogs::load_from_files(
//!     Path::new("data/main_drinks.json"),
//!     Path::new("data/systembolaget.json"),
//! );
//! let (primary, vendor) = catalogs.counts();
//! println!("{} house drinks, {} retail drinks", primary, vendor);
//! ```

pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use loader::load_catalog;
pub use types::{CatalogItem, CatalogKind, Catalogs, DrinkCategory};
