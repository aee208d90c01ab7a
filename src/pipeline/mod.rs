//! Aggregation pipeline: catalog load, concurrent per-file accumulation,
//! join barrier, ordered report emission.
//!
//! # Pipeline Flow
//!
//! 1. **Catalog load**: the product catalog is parsed once, synchronously
//!    before any worker starts, and is immutable from then on.
//! 2. **Fan-out**: the coordinator starts one accumulation task per order
//!    file, bounded by `max_concurrent_files`.
//! 3. **Fan-in**: the coordinator waits for every task to terminate,
//!    successfully or not.
//! 4. **Emission**: reports are rendered per file in the original file-list
//!    order, independent of completion order.
//!
//! There is no cross-file aggregation, no cancellation, and no timeout; a
//! worker that fails terminates itself early and yields partial results
//! without signalling its siblings.

pub mod config;
pub mod coordinator;

// Re-export main types for convenience
pub use config::{ConfigError, PipelineConfig};
pub use coordinator::{Coordinator, FileReport};
