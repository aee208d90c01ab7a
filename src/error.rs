//! Error types for orderstats operations.
//!
//! Only the catalog load has a run-fatal error surface. Per-file scan
//! failures live next to the scanner ([`crate::order::ScanError`]) and
//! configuration failures next to the config
//! ([`crate::pipeline::ConfigError`]).

use thiserror::Error;

/// Errors that can occur while loading the product catalog.
///
/// Malformed individual records are not errors; they are skipped during the
/// load. The catalog fails only when its source cannot be read as a whole,
/// which aborts the entire run before any accumulation starts.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{file}': {source}")]
    Unreadable {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Unreadable {
            file: "Products.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        let msg = err.to_string();
        assert!(msg.contains("Products.txt"));
        assert!(msg.contains("no such file"));
    }
}
