// Storefront HTTP server using actix-web

use crate::api::{middleware, routes};
use crate::catalog::{CatalogSource, CsvCatalog};
use crate::util::env as env_util;
use crate::pages;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 3000;

pub struct StorefrontServer {
    pub host: String,
    pub port: u16,
    /// Directory holding `products.csv` and `categories.csv`.
    pub catalog_dir: PathBuf,
    pub allowed_origins: String,
}

impl StorefrontServer {
    /// Create server from environment variables
    pub fn from_env() -> Result<Self> {
        env_util::init_env();

        let host = env_util::env_opt("STOREFRONT_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = env_util::env_parse("STOREFRONT_PORT", DEFAULT_PORT);

        let catalog_dir = match env_util::env_opt("CATALOG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().context("cannot resolve working directory")?,
        };

        let allowed_origins = env_util::env_opt("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            host,
            port,
            catalog_dir,
            allowed_origins,
        })
    }

    /// Start the HTTP server
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            catalog_dir = %self.catalog_dir.display(),
            "Starting storefront server"
        );

        let catalog = CsvCatalog::new(&self.catalog_dir);
        let health = catalog.health();
        if !health.products || !health.categories {
            tracing::warn!(
                products = health.products,
                categories = health.categories,
                "catalog files missing; listings will be empty until they appear"
            );
        }

        let source: Arc<dyn CatalogSource> = Arc::new(catalog);
        let source_data = web::Data::from(source);
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(&allowed_origins);

            App::new()
                .app_data(source_data.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
                .configure(pages::configure_pages)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_comes_from_env_with_default_fallback() {
        std::env::set_var("STOREFRONT_PORT", " 8088 ");
        assert_eq!(StorefrontServer::from_env().unwrap().port, 8088);
        std::env::set_var("STOREFRONT_PORT", "eighty");
        assert_eq!(StorefrontServer::from_env().unwrap().port, DEFAULT_PORT);
        std::env::remove_var("STOREFRONT_PORT");
    }
}
