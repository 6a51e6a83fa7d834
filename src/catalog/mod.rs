//! Catalog pipeline: CSV export files in, filtered and paginated records out.

pub mod categories;
pub mod csv_rows;
pub mod model;
pub mod products;
pub mod query;
pub mod report;
pub mod source;

pub use categories::{load_categories, read_categories};
pub use model::{is_sentinel_category, Category, Product, UNCATEGORIZED};
pub use products::{load_products, read_products};
pub use query::{CatalogQuery, ListingParams, Page, Pagination, SortOrder};
pub use source::{CatalogError, CatalogSource, CsvCatalog, Loaded, SourceHealth};
