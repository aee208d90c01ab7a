//! orderstats: concurrent per-file purchase statistics reports.
//!
//! This library loads an immutable product catalog, scans any number of
//! order files concurrently (one independent accumulator per file), joins
//! all of them, and renders one report per file in the original file order.

// Core modules
pub mod catalog;
pub mod cli;
pub mod error;
pub mod order;
pub mod pipeline;
pub mod report;

// Re-export commonly used error types
pub use error::CatalogError;
pub use order::ScanError;
pub use pipeline::ConfigError;
