//! Catalog data sources.
//!
//! Handlers and pages only see [`CatalogSource`]. The CSV-backed implementation
//! re-reads its files on every call and keeps no state between requests.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::categories::read_categories;
use super::model::{Category, Product};
use super::products::read_products;

pub const PRODUCTS_FILE: &str = "products.csv";
pub const CATEGORIES_FILE: &str = "categories.csv";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog source not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CatalogError {
    pub fn is_missing(&self) -> bool {
        matches!(self, CatalogError::SourceMissing { .. })
    }
}

/// Records kept from one pass over a source file, plus the number of rows dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}

/// Whether each backing store can currently be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceHealth {
    pub products: bool,
    pub categories: bool,
}

/// Read access to the catalog.
pub trait CatalogSource: Send + Sync {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Categories with the sentinel bucket already removed.
    fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    fn health(&self) -> SourceHealth;
}

/// Catalog backed by `products.csv` and `categories.csv` in one directory.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    dir: PathBuf,
}

impl CsvCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join(PRODUCTS_FILE)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(CATEGORIES_FILE)
    }
}

impl CatalogSource for CsvCatalog {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        read_products(&self.products_path()).map(|loaded| loaded.items)
    }

    fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        read_categories(&self.categories_path()).map(|loaded| loaded.items)
    }

    fn health(&self) -> SourceHealth {
        SourceHealth {
            products: self.products_path().is_file(),
            categories: self.categories_path().is_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_files_fresh_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CsvCatalog::new(dir.path());
        let path = catalog.products_path();

        fs::write(&path, "ID,post_title,regular_price\n1,Knife,10\n").unwrap();
        assert_eq!(catalog.list_products().unwrap().len(), 1);

        fs::write(&path, "ID,post_title,regular_price\n1,Knife,10\n2,Pan,20\n").unwrap();
        assert_eq!(catalog.list_products().unwrap().len(), 2);
    }

    #[test]
    fn missing_files_surface_as_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CsvCatalog::new(dir.path());

        assert!(catalog.list_products().unwrap_err().is_missing());
        assert!(catalog.list_categories().unwrap_err().is_missing());
        assert_eq!(
            catalog.health(),
            SourceHealth {
                products: false,
                categories: false
            }
        );
    }
}
