//! Error types for the catalog crate.
//!
//! Loading is fail-soft at the public boundary (`load_catalog` returns an
//! empty list), but the parser itself reports precise errors so the loader
//! can log what went wrong.

use thiserror::Error;

/// Errors that can occur while reading a catalog file
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be opened or read
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid JSON
    #[error("Error decoding catalog file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON root must be an array of item records
    #[error("Catalog file {path} does not contain a JSON array")]
    NotAnArray { path: String },

    /// A single record failed validation
    #[error("Invalid catalog entry at position {position}: {reason}")]
    InvalidRecord { position: usize, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
