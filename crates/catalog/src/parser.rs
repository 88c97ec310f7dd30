//! Parser for catalog JSON files.
//!
//! A catalog file is a JSON array of item objects. Parsing happens in two
//! layers:
//! - `parse_catalog` is strict about the file (must exist, must be a JSON
//!   array) and returns a `CatalogError` otherwise
//! - individual records are validated one by one; a record without a usable
//!   `Style_Name` is logged and skipped instead of failing the whole file

use crate::error::{CatalogError, Result};
use crate::types::CatalogItem;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::error;

/// Parse a catalog file from disk.
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog_str(&content, &path.display().to_string())
}

/// Parse catalog JSON already held in memory.
///
/// `origin` is only used for error messages.
pub fn parse_catalog_str(content: &str, origin: &str) -> Result<Vec<CatalogItem>> {
    let root: Value = serde_json::from_str(content).map_err(|source| CatalogError::Json {
        path: origin.to_string(),
        source,
    })?;

    let Value::Array(records) = root else {
        return Err(CatalogError::NotAnArray {
            path: origin.to_string(),
        });
    };

    let mut items = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        match parse_record(position, record) {
            Ok(item) => items.push(item),
            Err(e) => error!("{} ({})", e, origin),
        }
    }
    Ok(items)
}

/// Validate and convert a single record.
fn parse_record(position: usize, record: Value) -> Result<CatalogItem> {
    let has_name = record
        .get("Style_Name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(CatalogError::InvalidRecord {
            position,
            reason: format!("missing Style_Name: {}", record),
        });
    }

    serde_json::from_value(record).map_err(|e| CatalogError::InvalidRecord {
        position,
        reason: e.to_string(),
    })
}
