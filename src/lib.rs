//! Storefront over a WooCommerce catalog export.
//!
//! `products.csv` and `categories.csv` are parsed on every request and served
//! both as JSON (`/api/*`) and as server-rendered pages.

pub mod api;
pub mod catalog;
pub mod logging;
pub mod pages;

pub mod util {
    pub mod env;
}
