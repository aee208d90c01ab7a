//! CLI command definitions for orderstats.
//!
//! Two commands: `report` runs the full aggregation pipeline over a set of
//! order files, `catalog` loads a catalog file on its own and prints load
//! statistics.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::order::OrderSummary;
use crate::pipeline::{Coordinator, PipelineConfig};
use crate::report;

/// Concurrent per-file purchase statistics reports.
#[derive(Parser)]
#[command(name = "orderstats")]
#[command(about = "Compute per-file purchase statistics against a shared product catalog")]
#[command(version)]
#[command(
    long_about = "orderstats loads a product catalog once, scans each order file on its own \
concurrent worker, and prints one summary report per file in the order the files were given.\n\n\
Example usage:\n  orderstats report --catalog Products.txt 2021_orders.txt 2022_orders.txt"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Scan order files concurrently and print one report per file.
    #[command(alias = "run")]
    Report(ReportArgs),

    /// Load a catalog file and print how many records were accepted.
    Catalog(CatalogArgs),
}

/// Arguments for `orderstats report`.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Path to the product catalog file (id,name,price per line).
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Order files to scan (productId,amount,discountAmount per line).
    /// Reports are printed in this order.
    #[arg(required = true)]
    pub order_files: Vec<PathBuf>,

    /// Maximum number of order files scanned concurrently.
    #[arg(long, env = "ORDERSTATS_MAX_CONCURRENT")]
    pub max_concurrent: Option<usize>,

    /// Highest product id the catalog accepts.
    #[arg(long, env = "ORDERSTATS_CATALOG_CAPACITY")]
    pub capacity: Option<u32>,

    /// Emit reports as a JSON array instead of text blocks.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `orderstats catalog`.
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Path to the product catalog file.
    #[arg(short, long)]
    pub path: PathBuf,

    /// Highest product id the catalog accepts.
    #[arg(long, env = "ORDERSTATS_CATALOG_CAPACITY")]
    pub capacity: Option<u32>,
}

/// Parses command-line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the CLI with already-parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Report(args) => run_report_command(args).await,
        Commands::Catalog(args) => run_catalog_command(args).await,
    }
}

/// Parses arguments and runs the CLI.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

async fn run_report_command(args: ReportArgs) -> anyhow::Result<()> {
    let mut config = PipelineConfig::new();
    if let Some(max) = args.max_concurrent {
        config = config.with_max_concurrent_files(max);
    }
    if let Some(capacity) = args.capacity {
        config = config.with_catalog_capacity(capacity);
    }
    config.validate()?;

    // The catalog load is the one run-fatal step: without it there is
    // nothing to resolve order lines against.
    let (catalog, stats) = match Catalog::load(&args.catalog, config.catalog_capacity).await {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(catalog = %args.catalog.display(), error = %e, "catalog load failed, no reports produced");
            return Err(e).context("loading product catalog");
        }
    };

    info!(
        catalog = %args.catalog.display(),
        products = stats.loaded,
        skipped = stats.skipped,
        "catalog loaded"
    );

    let coordinator = Coordinator::new(config, Arc::new(catalog));
    let reports = coordinator.run(&args.order_files).await;

    if args.json {
        let entries: Vec<ReportEntry<'_>> = reports
            .iter()
            .map(|r| ReportEntry {
                file: r.file.display().to_string(),
                summary: &r.summary,
                error: r.error.as_ref().map(|e| e.to_string()),
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for file_report in &reports {
            let block =
                report::render(&file_report.file.display().to_string(), &file_report.summary);
            println!();
            print!("{}", block);
        }
    }

    Ok(())
}

/// One entry of the `report --json` output.
#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    file: String,
    summary: &'a OrderSummary,
    error: Option<String>,
}

async fn run_catalog_command(args: CatalogArgs) -> anyhow::Result<()> {
    let capacity = args.capacity.unwrap_or(crate::catalog::DEFAULT_CAPACITY);

    let (catalog, stats) = Catalog::load(&args.path, capacity)
        .await
        .context("loading product catalog")?;

    println!(
        "{}: {} products loaded, {} records skipped (capacity {})",
        args.path.display(),
        catalog.len(),
        stats.skipped,
        capacity
    );

    Ok(())
}
