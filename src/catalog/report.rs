// Consistency summary of the two export files, used by the catalog_check binary

use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{is_sentinel_category, Category, Product};
use super::source::Loaded;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub product_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub products_loaded: usize,
    pub products_skipped: usize,
    pub categories_loaded: usize,
    pub categories_skipped: usize,
    /// Products whose category fell back to the sentinel.
    pub uncategorized_products: usize,
    pub categories: Vec<CategoryCount>,
    /// Product category names with no matching category record, with product counts.
    pub unknown_categories: BTreeMap<String, usize>,
}

impl CatalogReport {
    /// Products are matched to categories by name or slug, ignoring case.
    pub fn build(products: &Loaded<Product>, categories: &Loaded<Category>) -> Self {
        let mut counts: Vec<CategoryCount> = categories
            .items
            .iter()
            .map(|c| CategoryCount {
                id: c.id.clone(),
                name: c.name.clone(),
                product_count: 0,
            })
            .collect();
        let mut unknown: BTreeMap<String, usize> = BTreeMap::new();
        let mut uncategorized = 0;

        for product in &products.items {
            if is_sentinel_category(&product.category) {
                uncategorized += 1;
                continue;
            }
            let wanted = product.category.to_lowercase();
            let hit = categories
                .items
                .iter()
                .position(|c| c.name.to_lowercase() == wanted || c.slug.to_lowercase() == wanted);
            match hit {
                Some(idx) => counts[idx].product_count += 1,
                None => *unknown.entry(product.category.clone()).or_default() += 1,
            }
        }

        Self {
            products_loaded: products.items.len(),
            products_skipped: products.skipped,
            categories_loaded: categories.items.len(),
            categories_skipped: categories.skipped,
            uncategorized_products: uncategorized,
            categories: counts,
            unknown_categories: unknown,
        }
    }
}
