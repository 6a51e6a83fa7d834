// HTTP server binary for the storefront
// Serves the JSON catalog API and the rendered pages from the same process

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use storefront::api::StorefrontServer;
use storefront::logging;
use storefront::util::env as env_util;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Serve the catalog export as a storefront")]
struct Args {
    /// Address to bind (overrides STOREFRONT_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Port to bind (overrides STOREFRONT_PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Directory containing products.csv and categories.csv (overrides CATALOG_DIR)
    #[arg(long)]
    catalog_dir: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load dotenv/env once (safe to call multiple times)
    env_util::init_env();
    logging::init_tracing(logging::DEFAULT_FILTER)?;

    let args = Args::parse();
    env_util::log_snapshot(
        "storefront",
        &["STOREFRONT_HOST", "STOREFRONT_PORT", "CATALOG_DIR", "ALLOWED_ORIGINS"],
    );

    let mut server = StorefrontServer::from_env()?;
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(dir) = args.catalog_dir {
        server.catalog_dir = dir;
    }

    server.run().await
}
