//! Product export loader.
//!
//! Maps WooCommerce export columns onto [`Product`] and drops rows that cannot
//! be sold (no title, or a price that is not positive).

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::csv_rows::{lenient_float, lenient_int, Row, RowReader};
use super::model::{slugify, Product, UNCATEGORIZED};
use super::source::{CatalogError, Loaded};

/// Stock substituted when the export reports zero or nothing.
///
/// The export does not distinguish "unknown" from "sold out", so zero is read
/// as available stock.
pub const DEFAULT_STOCK: i64 = 100;

static IMAGE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s!]+").expect("image url pattern"));

/// Why a row did not become a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    NonPositivePrice,
}

/// Map one export row onto a product.
pub fn product_from_row(row: &Row) -> Result<Product, SkipReason> {
    let name = row.get("post_title");
    if name.is_empty() {
        return Err(SkipReason::MissingTitle);
    }
    let price = lenient_float(row.get("regular_price"));
    if price <= 0.0 {
        return Err(SkipReason::NonPositivePrice);
    }

    let stock = match lenient_int(row.get("stock")) {
        0 => DEFAULT_STOCK,
        n => n,
    };

    let id = row
        .non_empty("ID")
        .map(str::to_string)
        .unwrap_or_else(|| format!("product-{}", row.number));
    let slug = row
        .non_empty("post_name")
        .map(str::to_string)
        .unwrap_or_else(|| slugify(name));

    Ok(Product {
        id,
        name: name.to_string(),
        slug,
        price,
        stock,
        images: extract_images(row.get("images")),
        category: primary_category(row.get("tax:product_cat")),
        brand: row.non_empty("tax:product_brand").map(str::to_string),
        description: row
            .non_empty("post_excerpt")
            .or_else(|| row.non_empty("post_content"))
            .map(str::to_string),
    })
}

/// First URL of every `|`-separated segment; segments without one are dropped.
///
/// Export segments look like `https://cdn/x.jpg ! alt : Knife ! title : ...`.
pub fn extract_images(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field
        .split('|')
        .filter_map(|segment| IMAGE_URL.find(segment))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// First `|`-separated taxonomy term, or `Uncategorized`.
pub fn primary_category(field: &str) -> String {
    field
        .split('|')
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

/// Load every sellable product from `path`.
pub fn read_products(path: &Path) -> Result<Loaded<Product>, CatalogError> {
    let reader = RowReader::open(path)?;
    let mut loaded = Loaded::default();

    for row in reader {
        let row = row?;
        match product_from_row(&row) {
            Ok(product) => loaded.items.push(product),
            Err(reason) => {
                debug!(row = row.number, ?reason, "skipping product row");
                loaded.skipped += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        loaded = loaded.items.len(),
        skipped = loaded.skipped,
        "products loaded"
    );
    Ok(loaded)
}

/// Direct-read path: a missing or unreadable file yields an empty catalog.
pub fn load_products(path: &Path) -> Vec<Product> {
    match read_products(path) {
        Ok(loaded) => loaded.items,
        Err(err @ CatalogError::SourceMissing { .. }) => {
            warn!(error = %err, "products file not found");
            Vec::new()
        }
        Err(err) => {
            warn!(error = ?err, "products file could not be read");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str =
        "ID,post_title,post_name,regular_price,stock,images,tax:product_cat,tax:product_brand,post_excerpt,post_content";

    fn write_catalog(rows: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        fs::write(&path, body).unwrap();
        (dir, path)
    }

    #[test]
    fn skips_rows_without_title_or_positive_price() {
        let (_dir, path) = write_catalog(&[
            "1,Knife,knife,10,5,,Cutting,,,",
            "2,,untitled,10,5,,Cutting,,,",
            "3,Free,free,0,5,,Cutting,,,",
            "4,Negative,negative,-2,5,,Cutting,,,",
            "5,NoPrice,no-price,,5,,Cutting,,,",
        ]);
        let loaded = read_products(&path).unwrap();

        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].name, "Knife");
        assert_eq!(loaded.skipped, 4);
        assert!(loaded.items.iter().all(|p| p.price > 0.0 && !p.name.is_empty()));
    }

    #[test]
    fn zero_or_missing_stock_defaults_to_hundred() {
        let (_dir, path) = write_catalog(&[
            "1,Zero,zero,10,0,,,,,",
            "2,Blank,blank,10,,,,,,",
            "3,Seven,seven,10,7,,,,,",
        ]);
        let products = load_products(&path);

        assert_eq!(products[0].stock, DEFAULT_STOCK);
        assert_eq!(products[1].stock, DEFAULT_STOCK);
        assert_eq!(products[2].stock, 7);
    }

    #[test]
    fn maps_export_columns() {
        let (_dir, path) = write_catalog(&[
            r#"42,"Chef's Knife, 20cm",chefs-knife,29.90,3,"https://cdn.example.com/a.jpg ! alt : Knife | https://cdn.example.com/b.jpg | no url here","Cutting|Kitchen > Knives",Forge,"Short, sharp.",Long text"#,
        ]);
        let product = &load_products(&path)[0];

        assert_eq!(product.id, "42");
        assert_eq!(product.name, "Chef's Knife, 20cm");
        assert_eq!(product.slug, "chefs-knife");
        assert_eq!(product.price, 29.90);
        assert_eq!(product.stock, 3);
        assert_eq!(
            product.images,
            vec!["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]
        );
        assert_eq!(product.category, "Cutting");
        assert_eq!(product.brand.as_deref(), Some("Forge"));
        assert_eq!(product.description.as_deref(), Some("Short, sharp."));
    }

    #[test]
    fn falls_back_for_id_slug_category_and_description() {
        let (_dir, path) = write_catalog(&[",Cast Iron Pan,,15,,,,,,Only content"]);
        let product = &load_products(&path)[0];

        assert_eq!(product.id, "product-1");
        assert_eq!(product.slug, "cast-iron-pan");
        assert_eq!(product.category, UNCATEGORIZED);
        assert_eq!(product.brand, None);
        assert_eq!(product.description.as_deref(), Some("Only content"));
    }

    #[test]
    fn fallback_id_counts_blank_lines() {
        let (_dir, path) = write_catalog(&[",Knife,,10,,,,,,", "", ",Pan,,20,,,,,,"]);
        let ids: Vec<String> = load_products(&path).into_iter().map(|p| p.id).collect();

        assert_eq!(ids, vec!["product-1", "product-3"]);
    }

    #[test]
    fn latin1_bytes_keep_the_product_and_only_invalid_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let mut body = format!("{HEADER}\n").into_bytes();
        body.extend_from_slice(b"1,Knife,knife,10,5,,Cutting,,Cr\xe8me finish,\n");
        body.extend_from_slice(b"\n");
        body.extend_from_slice(b"2,Pan,pan,20,5,,Baking,,plain,\n");
        body.extend_from_slice(b"3,Gr\xe4ter,grater,0,5,,Cutting,,,\n");
        fs::write(&path, body).unwrap();

        let loaded = read_products(&path).unwrap();
        let names: Vec<&str> = loaded.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Knife", "Pan"]);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(
            loaded.items[0].description.as_deref(),
            Some("Cr\u{fffd}me finish")
        );
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");

        assert!(load_products(&path).is_empty());
        assert!(read_products(&path).unwrap_err().is_missing());
    }

    #[test]
    fn image_segments_without_urls_are_dropped() {
        assert_eq!(
            extract_images("http://a.test/x.png!alt|nothing|https://b.test/y.png"),
            vec!["http://a.test/x.png", "https://b.test/y.png"]
        );
        assert!(extract_images("").is_empty());
    }

    #[test]
    fn primary_category_takes_first_trimmed_term() {
        assert_eq!(primary_category(" Cutting | Kitchen"), "Cutting");
        assert_eq!(primary_category(""), UNCATEGORIZED);
        assert_eq!(primary_category(" |Kitchen"), UNCATEGORIZED);
    }
}
