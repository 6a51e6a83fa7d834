// Reusable page fragments: product cards, category tiles, sort selector, pager

use std::fmt::Write;

use super::html::{escape, format_price, query_string};
use crate::catalog::{CatalogQuery, Category, Pagination, Product, SortOrder};

const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

pub fn product_card(product: &Product) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<a class=\"card\" href=\"/products/{}\"><div class=\"media\">",
        escape(&urlencoding::encode(&product.slug))
    );
    match product.primary_image() {
        Some(src) => {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape(src),
                escape(&product.name)
            );
        }
        None => {
            let _ = write!(html, "<img src=\"{}\" alt=\"Placeholder\">", PLACEHOLDER_IMAGE);
        }
    }
    if !product.in_stock() {
        html.push_str("<div class=\"sold-out\">Out of Stock</div>");
    }
    let _ = write!(
        html,
        "</div><div class=\"body\"><span class=\"badge\">{}</span>",
        escape(&product.category)
    );
    if let Some(brand) = &product.brand {
        let _ = write!(html, "<p class=\"brand\">{}</p>", escape(brand));
    }
    let _ = write!(
        html,
        "<h3>{}</h3><div class=\"footer\"><span class=\"price\">{}</span>\
         <button type=\"button\"{}>Add to Cart</button></div></div></a>",
        escape(&product.name),
        format_price(product.price),
        if product.in_stock() { "" } else { " disabled" }
    );
    html
}

pub fn product_grid(products: &[Product]) -> String {
    let mut html = String::from("<div class=\"grid\">");
    for product in products {
        html.push_str(&product_card(product));
    }
    html.push_str("</div>");
    html
}

pub fn category_tiles(categories: &[Category]) -> String {
    let mut html = String::from("<div class=\"grid categories\">");
    for category in categories {
        let _ = write!(
            html,
            "<a class=\"card\" href=\"/products{}\"><div class=\"body\"><h3>{}</h3>",
            escape(&query_string(&[("category", Some(category.name.as_str()))])),
            escape(&category.name)
        );
        if let Some(description) = &category.description {
            let _ = write!(html, "<p>{}</p>", escape(description));
        }
        html.push_str("</div></a>");
    }
    html.push_str("</div>");
    html
}

/// Link to `page` of the listing described by `query`, keeping its filters and order.
pub fn listing_href(query: &CatalogQuery, page: usize) -> String {
    let page = page.to_string();
    let sort = (query.sort != SortOrder::Newest).then(|| query.sort.as_str());
    format!(
        "/products{}",
        query_string(&[
            ("search", query.search.as_deref()),
            ("category", query.category.as_deref()),
            ("brand", query.brand.as_deref()),
            ("sort", sort),
            ("page", Some(page.as_str())),
        ])
    )
}

/// GET form re-submitting the current filters with a new sort order.
pub fn sort_selector(query: &CatalogQuery) -> String {
    let mut html = String::from(
        "<form class=\"sort\" action=\"/products\" method=\"get\">\
         <label for=\"sort\">Sort by:</label>",
    );
    for (name, value) in [
        ("search", &query.search),
        ("category", &query.category),
        ("brand", &query.brand),
    ] {
        if let Some(value) = value {
            let _ = write!(
                html,
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                name,
                escape(value)
            );
        }
    }
    html.push_str("<select id=\"sort\" name=\"sort\" onchange=\"this.form.submit()\">");
    for order in SortOrder::ALL {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            order.as_str(),
            if order == query.sort { " selected" } else { "" },
            order.label()
        );
    }
    html.push_str("</select><noscript><button type=\"submit\">Apply</button></noscript></form>");
    html
}

/// Previous / numbered / next links. Empty when everything fits on one page.
pub fn pager(query: &CatalogQuery, pagination: &Pagination) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }
    let mut html = String::from("<nav class=\"pager\" aria-label=\"Pagination\">");
    if pagination.page > 1 {
        let _ = write!(
            html,
            "<a href=\"{}\">Previous</a>",
            escape(&listing_href(query, pagination.page - 1))
        );
    }
    for p in 1..=pagination.total_pages {
        let _ = write!(
            html,
            "<a href=\"{}\"{}>{}</a>",
            escape(&listing_href(query, p)),
            if p == pagination.page { " class=\"current\"" } else { "" },
            p
        );
    }
    if pagination.page < pagination.total_pages {
        let _ = write!(
            html,
            "<a href=\"{}\">Next</a>",
            escape(&listing_href(query, pagination.page + 1))
        );
    }
    html.push_str("</nav>");
    html
}
