//! Filtering, ordering and pagination over a freshly loaded product list.

use serde::{Deserialize, Serialize};

use super::model::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 12;

/// Listing order. `Newest` is the export's own row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    /// No popularity data exists in the export; behaves like `Newest`.
    Popular,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
        SortOrder::Popular,
    ];

    /// Unknown values fall back to the default order.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price-low" => SortOrder::PriceLow,
            "price-high" => SortOrder::PriceHigh,
            "popular" => SortOrder::Popular,
            _ => SortOrder::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Popular => "popular",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
            SortOrder::Popular => "Most Popular",
        }
    }
}

/// Query-string parameters as received; every value is optional and unvalidated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub sort: Option<String>,
}

impl ListingParams {
    /// Coerce raw parameters: non-positive or unparsable page/limit take their
    /// defaults, blank filters are dropped.
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            page: positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
            category: non_blank(self.category.as_deref()),
            search: non_blank(self.search.as_deref()),
            brand: non_blank(self.brand.as_deref()),
            sort: self
                .sort
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}

fn positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub page: usize,
    pub limit: usize,
    pub category: Option<String>,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub sort: SortOrder,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            search: None,
            brand: None,
            sort: SortOrder::Newest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl CatalogQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_brand = product
                .brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(&needle));
            if !in_name && !in_brand {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            let same = product
                .brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase() == brand.to_lowercase());
            if !same {
                return false;
            }
        }
        true
    }

    /// Filter, order, then cut out the requested page.
    pub fn apply(&self, products: Vec<Product>) -> Page<Product> {
        let mut filtered: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            SortOrder::PriceLow => filtered.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHigh => filtered.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Newest | SortOrder::Popular => {}
        }

        let limit = self.limit.max(1);
        let total = filtered.len();
        let start = self.page.saturating_sub(1).saturating_mul(limit);
        let items = if start >= total {
            Vec::new()
        } else {
            filtered.into_iter().skip(start).take(limit).collect()
        };

        Page {
            items,
            pagination: Pagination {
                page: self.page,
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }
    }
}

/// Product whose slug equals `slug`, first in export order.
pub fn find_by_slug(products: Vec<Product>, slug: &str) -> Option<Product> {
    products.into_iter().find(|p| p.slug == slug)
}
