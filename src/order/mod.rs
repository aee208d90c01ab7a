//! Per-file order scanning and accumulation.
//!
//! Each order file is turned into one [`OrderSummary`], independently of all
//! other files. The summary is owned exclusively by the worker scanning the
//! file and only becomes visible to the coordinator after that worker has
//! finished, so no locking is involved anywhere in the accumulation.
//!
//! Two failure modes are deliberately asymmetric and must stay that way:
//!
//! - a line with the wrong *shape* (field count other than three) is skipped
//!   and the scan continues;
//! - a three-field line with an unparsable numeric *value* aborts the rest of
//!   that file's scan. The totals accumulated up to that point are still
//!   reported.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::catalog::{Catalog, Product};

/// Errors that abort a single order file's scan.
///
/// A `ScanError` never affects sibling files; the coordinator logs it and
/// still emits a report from the partial summary.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The order file could not be read.
    #[error("failed to read order file '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A three-field line carried a numeric field that failed to parse.
    #[error("invalid {field} '{value}' on line {line} of '{file}': {reason}")]
    InvalidField {
        file: String,
        line: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// One parsed order line. Transient: consumed immediately by the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: u32,
    pub amount: u32,
    pub discount: Decimal,
}

/// Running purchase statistics for one order file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sum of discounted line costs.
    pub total_cost: Decimal,
    /// Sum of item amounts across resolved lines.
    pub total_amount: u64,
    /// Sum of discount amounts across resolved lines.
    pub total_discount: Decimal,
    /// Highest discounted line cost seen so far. Starts at zero; only lines
    /// strictly above it update the maximum, so the first of equal maxima
    /// wins.
    pub top_cost: Decimal,
    /// Product of the line holding the running maximum, if any line ever
    /// exceeded zero.
    pub top_product: Option<Product>,
}

impl OrderSummary {
    /// Folds one resolved order line into the running totals.
    pub fn apply(&mut self, line: &OrderLine, product: &Product) {
        let item_cost = product.price * Decimal::from(line.amount);
        let discounted = item_cost - line.discount;

        self.total_cost += discounted;
        self.total_amount += u64::from(line.amount);
        self.total_discount += line.discount;

        if discounted > self.top_cost {
            self.top_cost = discounted;
            self.top_product = Some(product.clone());
        }
    }

    /// Average discount per item, exactly zero for an empty summary.
    pub fn average_discount(&self) -> Decimal {
        if self.total_amount == 0 {
            Decimal::ZERO
        } else {
            self.total_discount / Decimal::from(self.total_amount)
        }
    }
}

/// Result of scanning one order file: the summary plus the error that cut
/// the scan short, if any. The summary is always present — a failed scan
/// carries whatever totals were accumulated before the failure.
#[derive(Debug)]
pub struct ScanOutcome {
    pub summary: OrderSummary,
    pub error: Option<ScanError>,
}

/// Scans one order file against the catalog.
///
/// An unreadable file yields an empty summary together with the I/O error.
pub async fn scan_file(path: &Path, catalog: &Catalog) -> ScanOutcome {
    let file = path.display().to_string();

    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(source) => {
            return ScanOutcome {
                summary: OrderSummary::default(),
                error: Some(ScanError::Io { file, source }),
            }
        }
    };

    scan_lines(&file, text.lines(), catalog)
}

/// Accumulates order lines into a summary, stopping at the first numeric
/// parse failure.
pub fn scan_lines<'a, I>(file: &str, lines: I, catalog: &Catalog) -> ScanOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut summary = OrderSummary::default();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line = match parse_line(file, idx + 1, raw) {
            Ok(Some(line)) => line,
            // Wrong shape: tolerated, keep scanning.
            Ok(None) => continue,
            // Bad numeric value: the rest of this file is not processed.
            Err(err) => {
                return ScanOutcome {
                    summary,
                    error: Some(err),
                }
            }
        };

        match catalog.get(line.product_id) {
            Some(product) => summary.apply(&line, product),
            None => {
                trace!(file, product_id = line.product_id, "unknown product id, line ignored");
            }
        }
    }

    ScanOutcome {
        summary,
        error: None,
    }
}

/// Parses one order line.
///
/// Returns `Ok(None)` when the field count is not exactly three, and
/// `Err(ScanError::InvalidField)` when a field fails numeric parsing.
fn parse_line(file: &str, line_no: usize, raw: &str) -> Result<Option<OrderLine>, ScanError> {
    let fields = split_record(raw);
    if fields.len() != 3 {
        return Ok(None);
    }

    let invalid = |field: &'static str, value: &str, reason: String| ScanError::InvalidField {
        file: file.to_string(),
        line: line_no,
        field,
        value: value.trim().to_string(),
        reason,
    };

    let product_id: u32 = fields[0]
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid("product id", fields[0], e.to_string()))?;

    let amount: u32 = fields[1]
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid("amount", fields[1], e.to_string()))?;

    let discount: Decimal = fields[2]
        .trim()
        .parse()
        .map_err(|e: rust_decimal::Error| invalid("discount", fields[2], e.to_string()))?;

    Ok(Some(OrderLine {
        product_id,
        amount,
        discount,
    }))
}

/// Splits a record on commas, dropping trailing empty fields.
///
/// A trailing comma therefore changes the field count rather than producing
/// an empty field: `1,2,` is a two-field line (shape-skipped), not a
/// three-field line with an empty discount. Whitespace-only fields are kept.
pub(crate) fn split_record(raw: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = raw.split(',').collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}
