//! catalog_check.rs
//! Loads both export files the way the server does and reports what a request would see:
//! rows kept and skipped, products per category, and product categories with no record.
//! Env:
//!   CATALOG_DIR=/path/to/exports (optional, defaults to the working directory)
//!   RUST_LOG=debug (optional, logs every skipped row)

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use storefront::catalog::report::CatalogReport;
use storefront::catalog::{read_categories, read_products, CatalogError, CsvCatalog};
use storefront::logging;
use storefront::util::env as env_util;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "catalog_check", version, about = "Validate the storefront catalog export")]
struct Cli {
    /// Directory containing products.csv and categories.csv
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Print the report as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_util::init_env();
    logging::init_tracing("info")?;
    let cli = Cli::parse();

    let dir = match cli.dir.or_else(|| env_util::env_opt("CATALOG_DIR").map(PathBuf::from)) {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot resolve working directory")?,
    };
    let catalog = CsvCatalog::new(&dir);

    let products = read_products(&catalog.products_path());
    let categories = read_categories(&catalog.categories_path());
    let (products, categories) = match (products, categories) {
        (Ok(p), Ok(c)) => (p, c),
        (Err(err @ CatalogError::SourceMissing { .. }), _)
        | (_, Err(err @ CatalogError::SourceMissing { .. })) => {
            bail!("{err}")
        }
        (Err(err), _) | (_, Err(err)) => {
            return Err(anyhow::Error::new(err).context("catalog export is unreadable"))
        }
    };

    let report = CatalogReport::build(&products, &categories);
    info!(
        dir = %dir.display(),
        products = report.products_loaded,
        products_skipped = report.products_skipped,
        categories = report.categories_loaded,
        categories_skipped = report.categories_skipped,
        "catalog loaded"
    );
    for (name, count) in &report.unknown_categories {
        warn!(category = %name, products = count, "product category has no category record");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Products: {} loaded, {} skipped ({} uncategorized)",
        report.products_loaded, report.products_skipped, report.uncategorized_products
    );
    println!(
        "Categories: {} loaded, {} skipped",
        report.categories_loaded, report.categories_skipped
    );
    println!("\nProducts per category:");
    for c in &report.categories {
        println!("  [{}] {:<40} {}", c.id, c.name, c.product_count);
    }
    if !report.unknown_categories.is_empty() {
        println!("\nCategories referenced by products but missing from categories.csv:");
        for (name, count) in &report.unknown_categories {
            println!("  {:<44} {}", name, count);
        }
    }
    Ok(())
}
