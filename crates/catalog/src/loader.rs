//! Fail-soft catalog loading.
//!
//! A missing or broken catalog must never stop the server from starting:
//! the condition is logged and the catalog is treated as empty. The
//! recommendation engine then reports "no drinks in category" for requests
//! that would have needed it.

use crate::parser;
use crate::types::{CatalogItem, CatalogKind, Catalogs};
use std::path::Path;
use tracing::{error, info};

/// Load one catalog file, returning an empty list on any file-level error.
pub fn load_catalog(path: &Path) -> Vec<CatalogItem> {
    match parser::parse_catalog(path) {
        Ok(items) => {
            info!("Loaded {} items from {}", items.len(), path.display());
            items
        }
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

impl Catalogs {
    /// Load the primary and vendor catalogs.
    ///
    /// Rayon's `join` parses both files in parallel; each side fails soft
    /// on its own.
    pub fn load_from_files(primary_path: &Path, vendor_path: &Path) -> Self {
        let (primary, vendor) = rayon::join(
            || load_catalog(primary_path),
            || load_catalog(vendor_path),
        );

        let catalogs = Catalogs::new(primary, vendor);
        let (primary_len, vendor_len) = catalogs.counts();
        info!(
            "Catalogs ready: {}={} items, {}={} items",
            CatalogKind::Primary,
            primary_len,
            CatalogKind::Vendor,
            vendor_len
        );
        catalogs
    }
}
