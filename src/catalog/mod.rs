//! Product catalog loading and lookup.
//!
//! The catalog is populated once at startup, before any order file is
//! scanned, and is read-only afterwards. Workers share it behind an `Arc`
//! without any locking because no writes happen after the load completes.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;

/// Default number of product ids a catalog accepts (`1..=100`).
pub const DEFAULT_CAPACITY: u32 = 100;

/// A single product as loaded from the catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Positive product identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Unit price. Non-negative by construction: records with a negative
    /// price are rejected during loading.
    pub price: Decimal,
}

/// Counters describing the outcome of a catalog load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of products stored in the catalog.
    pub loaded: usize,
    /// Number of records skipped (wrong field count, unparsable fields,
    /// out-of-range id, negative price).
    pub skipped: usize,
}

/// Immutable id-keyed product lookup table.
///
/// Ids outside `[1, capacity]` are never stored; looking one up simply
/// returns `None`. A miss is normal data, not an error.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: HashMap<u32, Product>,
    capacity: u32,
}

impl Catalog {
    /// Creates an empty catalog accepting ids in `[1, capacity]`.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            products: HashMap::new(),
            capacity,
        }
    }

    /// Loads a catalog from a file.
    ///
    /// Malformed records are skipped and counted; the load itself fails only
    /// when the source cannot be read at all.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unreadable`] if the file cannot be read.
    pub async fn load(path: &Path, capacity: u32) -> Result<(Self, LoadStats), CatalogError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Unreadable {
                file: path.display().to_string(),
                source,
            })?;

        Ok(Self::parse(&text, capacity))
    }

    /// Parses catalog records from line-oriented text.
    ///
    /// Each record is `id,name,price` with whitespace trimmed around fields
    /// and no header row. A later record for the same id overwrites the
    /// earlier one.
    pub fn parse(text: &str, capacity: u32) -> (Self, LoadStats) {
        let mut catalog = Self::with_capacity(capacity);
        let mut skipped = 0usize;

        for (idx, raw) in text.lines().enumerate() {
            match parse_record(raw, capacity) {
                Some(product) => {
                    catalog.products.insert(product.id, product);
                }
                None => {
                    // Blank trailing lines are not data quality problems.
                    if !raw.trim().is_empty() {
                        debug!(line = idx + 1, record = raw, "skipping malformed catalog record");
                        skipped += 1;
                    }
                }
            }
        }

        let stats = LoadStats {
            loaded: catalog.products.len(),
            skipped,
        };
        (catalog, stats)
    }

    /// Looks up a product by id. Absent ids yield `None`.
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Number of products stored.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` when no products are stored.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Highest id this catalog accepts.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

/// Parses one catalog record, returning `None` for anything malformed.
fn parse_record(raw: &str, capacity: u32) -> Option<Product> {
    let fields = crate::order::split_record(raw);
    if fields.len() != 3 {
        return None;
    }

    let id: u32 = fields[0].trim().parse().ok()?;
    if id == 0 || id > capacity {
        return None;
    }

    let name = fields[1].trim();

    let price: Decimal = fields[2].trim().parse().ok()?;
    if price.is_sign_negative() {
        return None;
    }

    Some(Product {
        id,
        name: name.to_string(),
        price,
    })
}
