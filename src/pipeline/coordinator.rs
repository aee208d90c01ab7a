//! Fan-out/fan-in coordination of per-file order scans.
//!
//! The coordinator spawns one scan per order file over a bounded concurrent
//! stream, waits for every scan to finish, and hands the results back in the
//! original file-list order — never in completion order. Workers share only
//! the read-only catalog; each owns its summary exclusively until it
//! terminates, so the whole parallel phase runs without locks.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::order::{self, OrderSummary, ScanError, ScanOutcome};

use super::config::PipelineConfig;

/// Final state of one order file's scan, ready for report emission.
#[derive(Debug)]
pub struct FileReport {
    /// The order file this report covers.
    pub file: PathBuf,
    /// Accumulated totals; partial when `error` is set.
    pub summary: OrderSummary,
    /// The failure that cut the scan short, if any.
    pub error: Option<ScanError>,
}

impl FileReport {
    /// Returns `true` when the scan ran to completion.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Coordinates concurrent scanning of order files against a shared catalog.
///
/// The catalog must be fully loaded before the coordinator is constructed;
/// nothing mutates it afterwards.
pub struct Coordinator {
    config: PipelineConfig,
    catalog: Arc<Catalog>,
}

impl Coordinator {
    /// Creates a coordinator over an already-loaded catalog.
    pub fn new(config: PipelineConfig, catalog: Arc<Catalog>) -> Self {
        Self { config, catalog }
    }

    /// Scans all order files concurrently and returns one report per file,
    /// in the order the files were given.
    ///
    /// A scan failure is logged and contained to its own file: the report
    /// still carries the totals accumulated before the failure, and sibling
    /// scans are neither cancelled nor affected.
    pub async fn run(&self, files: &[PathBuf]) -> Vec<FileReport> {
        let catalog = Arc::clone(&self.catalog);

        let reports = gather_ordered(files, self.config.max_concurrent_files, move |path| {
            let catalog = Arc::clone(&catalog);
            async move { order::scan_file(&path, &catalog).await }
        })
        .await;

        let failed = reports.iter().filter(|r| !r.is_complete()).count();
        info!(
            files = reports.len(),
            failed,
            "all order file scans finished"
        );

        reports
    }

    /// Returns the coordinator's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

/// Runs one scan future per file with bounded concurrency and collects the
/// outcomes in input order.
///
/// `buffered` drives up to `max_concurrent` scans at a time but yields
/// results positionally, which is exactly the join-barrier-then-ordered-
/// emission contract: a slow early file delays emission, it never reorders
/// it.
async fn gather_ordered<F, Fut>(files: &[PathBuf], max_concurrent: usize, scan: F) -> Vec<FileReport>
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = ScanOutcome>,
{
    let scans = files.iter().cloned().map(|path| {
        let fut = scan(path.clone());
        async move {
            debug!(file = %path.display(), "scanning order file");
            let outcome = fut.await;

            if let Some(err) = &outcome.error {
                error!(file = %path.display(), error = %err, "order file scan aborted");
            }

            FileReport {
                file: path,
                summary: outcome.summary,
                error: outcome.error,
            }
        }
    });

    stream::iter(scans)
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rust_decimal::Decimal;

    fn path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    fn summary_with_amount(amount: u64) -> OrderSummary {
        OrderSummary {
            total_amount: amount,
            ..OrderSummary::default()
        }
    }

    #[tokio::test]
    async fn test_gather_ordered_empty_input() {
        let reports = gather_ordered(&[], 4, |_| async {
            ScanOutcome {
                summary: OrderSummary::default(),
                error: None,
            }
        })
        .await;

        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_emission_order_is_input_order_not_completion_order() {
        let files = vec![path("2021.txt"), path("2022.txt"), path("2023.txt")];

        // The first file finishes last by a wide margin; output order must
        // not change.
        let reports = gather_ordered(&files, 4, |p| async move {
            let (delay_ms, amount) = match p.to_str() {
                Some("2021.txt") => (80, 1),
                Some("2022.txt") => (10, 2),
                _ => (1, 3),
            };
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            ScanOutcome {
                summary: summary_with_amount(amount),
                error: None,
            }
        })
        .await;

        let order: Vec<_> = reports.iter().map(|r| r.file.clone()).collect();
        assert_eq!(order, files);
        assert_eq!(reports[0].summary.total_amount, 1);
        assert_eq!(reports[1].summary.total_amount, 2);
        assert_eq!(reports[2].summary.total_amount, 3);
    }

    #[tokio::test]
    async fn test_failed_scan_keeps_partial_summary_and_spares_siblings() {
        let files = vec![path("good.txt"), path("bad.txt")];

        let reports = gather_ordered(&files, 2, |p| async move {
            if p.to_str() == Some("bad.txt") {
                ScanOutcome {
                    summary: summary_with_amount(7),
                    error: Some(ScanError::InvalidField {
                        file: "bad.txt".to_string(),
                        line: 8,
                        field: "amount",
                        value: "x".to_string(),
                        reason: "invalid digit found in string".to_string(),
                    }),
                }
            } else {
                ScanOutcome {
                    summary: summary_with_amount(3),
                    error: None,
                }
            }
        })
        .await;

        assert!(reports[0].is_complete());
        assert_eq!(reports[0].summary.total_amount, 3);

        assert!(!reports[1].is_complete());
        assert_eq!(reports[1].summary.total_amount, 7);
    }

    #[tokio::test]
    async fn test_run_scans_real_files_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog_text = "1,Pen,1.50\n2,Mug,5.00";
        let (catalog, _) = Catalog::parse(catalog_text, 100);

        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "1,2,0.50\n2,1,0.00\n9,1,0.00\n").expect("write first");
        std::fs::write(&second, "2,2,1.00\n").expect("write second");

        let coordinator = Coordinator::new(PipelineConfig::default(), Arc::new(catalog));
        let reports = coordinator.run(&[first.clone(), second.clone()]).await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file, first);
        assert_eq!(reports[1].file, second);

        let expected_cost: Decimal = "7.50".parse().expect("decimal");
        assert_eq!(reports[0].summary.total_cost, expected_cost);
        assert_eq!(reports[0].summary.total_amount, 3);
        assert_eq!(reports[1].summary.total_amount, 2);
    }

    #[tokio::test]
    async fn test_run_missing_order_file_reports_empty_partial() {
        let (catalog, _) = Catalog::parse("1,Pen,1.50", 100);
        let coordinator = Coordinator::new(PipelineConfig::default(), Arc::new(catalog));

        let reports = coordinator
            .run(&[PathBuf::from("/nonexistent/orders.txt")])
            .await;

        assert_eq!(reports.len(), 1);
        assert!(!reports[0].is_complete());
        assert_eq!(reports[0].summary, OrderSummary::default());
    }
}
