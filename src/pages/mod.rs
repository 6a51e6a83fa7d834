//! Server-rendered storefront pages.
//!
//! Pages read the catalog through the same [`CatalogSource`] and blocking-pool
//! boundary as the JSON endpoints. A missing export renders as an empty shop;
//! any other failure renders a generic error page.

pub mod components;
pub mod html;
pub mod layout;

use std::fmt::Write;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::api::error::{fetch, FetchError};
use crate::catalog::query::find_by_slug;
use crate::catalog::{CatalogQuery, CatalogSource, Category, ListingParams};
use components::{category_tiles, pager, product_grid, sort_selector};
use html::{escape, format_price, query_string};
use layout::render_shell;

const FEATURED_COUNT: usize = 8;

pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/products", web::get().to(product_listing))
        .route("/products/{slug}", web::get().to(product_detail))
        .route("/categories", web::get().to(category_index));
}

fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn error_page(err: &FetchError) -> HttpResponse {
    tracing::error!(error = ?err, "page render failed");
    let body = render_shell(
        "Something went wrong",
        &[],
        None,
        "<div class=\"container\"><h1>Something went wrong</h1>\
         <p>We could not load the catalog. Please try again shortly.</p></div>",
    );
    html_response(StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// Missing exports read as an empty catalog for page rendering.
fn or_empty<T>(result: Result<Vec<T>, FetchError>) -> Result<Vec<T>, FetchError> {
    match result {
        Err(err) if err.is_missing() => {
            tracing::warn!(error = %err, "rendering with empty catalog");
            Ok(Vec::new())
        }
        other => other,
    }
}

async fn nav_categories(source: &web::Data<dyn CatalogSource>) -> Result<Vec<Category>, FetchError> {
    or_empty(fetch(source.clone(), |s| s.list_categories()).await)
}

async fn home(source: web::Data<dyn CatalogSource>) -> HttpResponse {
    let categories = match nav_categories(&source).await {
        Ok(c) => c,
        Err(err) => return error_page(&err),
    };
    let products = match or_empty(fetch(source, |s| s.list_products()).await) {
        Ok(p) => p,
        Err(err) => return error_page(&err),
    };
    let featured = CatalogQuery {
        limit: FEATURED_COUNT,
        ..CatalogQuery::default()
    }
    .apply(products);

    let mut body = String::from(
        "<section class=\"hero\"><div class=\"container\"><h1>Quality products, delivered</h1>\
         <p>Browse the full catalog or jump into a category.</p>\
         <a class=\"button\" href=\"/products\">Shop all products</a></div></section>\
         <div class=\"container\">",
    );
    if !categories.is_empty() {
        body.push_str("<h2>Shop by category</h2>");
        body.push_str(&category_tiles(&categories));
    }
    body.push_str("<h2>Featured products</h2>");
    if featured.items.is_empty() {
        body.push_str("<p>No products available yet.</p>");
    } else {
        body.push_str(&product_grid(&featured.items));
    }
    body.push_str("</div>");

    html_response(StatusCode::OK, render_shell("Home", &categories, None, &body))
}

fn listing_title(query: &CatalogQuery) -> String {
    if let Some(search) = &query.search {
        format!("Search Results for \"{}\"", search)
    } else if let Some(category) = &query.category {
        category.replace('-', " ")
    } else if let Some(brand) = &query.brand {
        brand.replace('-', " ")
    } else {
        "All Products".to_string()
    }
}

async fn product_listing(
    params: web::Query<ListingParams>,
    source: web::Data<dyn CatalogSource>,
) -> HttpResponse {
    // The listing page always shows twelve per page, whatever `limit` says.
    let query = CatalogQuery {
        limit: crate::catalog::query::DEFAULT_LIMIT,
        ..params.into_inner().to_query()
    };
    let categories = match nav_categories(&source).await {
        Ok(c) => c,
        Err(err) => return error_page(&err),
    };
    let products = match or_empty(fetch(source, |s| s.list_products()).await) {
        Ok(p) => p,
        Err(err) => return error_page(&err),
    };
    let page = query.apply(products);
    let title = listing_title(&query);
    let total = page.pagination.total;

    let mut body = String::new();
    let _ = write!(
        body,
        "<div class=\"page-header\"><div class=\"container\"><h1>{}</h1><p>{} product{} found</p></div></div>\
         <div class=\"container\"><div class=\"toolbar\">{}<span>Page {} of {}</span></div>",
        escape(&title),
        total,
        if total == 1 { "" } else { "s" },
        sort_selector(&query),
        page.pagination.page,
        page.pagination.total_pages
    );
    if page.items.is_empty() {
        body.push_str(
            "<div class=\"empty\"><p>No products found</p>\
             <a class=\"button\" href=\"/products\">View All Products</a></div>",
        );
    } else {
        body.push_str(&product_grid(&page.items));
        body.push_str(&pager(&query, &page.pagination));
    }
    body.push_str("</div>");

    html_response(
        StatusCode::OK,
        render_shell(&title, &categories, query.search.as_deref(), &body),
    )
}

async fn product_detail(
    slug: web::Path<String>,
    source: web::Data<dyn CatalogSource>,
) -> HttpResponse {
    let slug = slug.into_inner();
    let categories = match nav_categories(&source).await {
        Ok(c) => c,
        Err(err) => return error_page(&err),
    };
    let found = match or_empty(fetch(source, |s| s.list_products()).await) {
        Ok(products) => find_by_slug(products, &slug),
        Err(err) => return error_page(&err),
    };

    let Some(product) = found else {
        let body = "<div class=\"container\"><h1>Product not found</h1>\
                    <p>The product you are looking for is not in the catalog.</p>\
                    <a class=\"button\" href=\"/products\">View All Products</a></div>";
        return html_response(
            StatusCode::NOT_FOUND,
            render_shell("Product not found", &categories, None, body),
        );
    };

    let mut body = String::from("<article class=\"container product\"><div class=\"gallery\">");
    for src in &product.images {
        let _ = write!(
            body,
            "<img src=\"{}\" alt=\"{}\">",
            escape(src),
            escape(&product.name)
        );
    }
    let _ = write!(
        body,
        "</div><div class=\"details\"><a class=\"badge\" href=\"/products{}\">{}</a>",
        escape(&query_string(&[("category", Some(product.category.as_str()))])),
        escape(&product.category)
    );
    if let Some(brand) = &product.brand {
        let _ = write!(
            body,
            "<p class=\"brand\"><a href=\"/products{}\">{}</a></p>",
            escape(&query_string(&[("brand", Some(brand.as_str()))])),
            escape(brand)
        );
    }
    let _ = write!(
        body,
        "<h1>{}</h1><p class=\"price\">{}</p><p class=\"stock\">{}</p>",
        escape(&product.name),
        format_price(product.price),
        if product.in_stock() { "In stock" } else { "Out of stock" }
    );
    if let Some(description) = &product.description {
        let _ = write!(body, "<div class=\"description\">{}</div>", escape(description));
    }
    body.push_str("</div></article>");

    tracing::debug!(slug = %slug, "product detail rendered");
    html_response(
        StatusCode::OK,
        render_shell(&product.name, &categories, None, &body),
    )
}

async fn category_index(source: web::Data<dyn CatalogSource>) -> HttpResponse {
    let categories = match nav_categories(&source).await {
        Ok(c) => c,
        Err(err) => return error_page(&err),
    };
    let mut body = String::from("<div class=\"container\"><h1>Categories</h1>");
    if categories.is_empty() {
        body.push_str("<p>No categories available.</p>");
    } else {
        body.push_str(&category_tiles(&categories));
    }
    body.push_str("</div>");
    html_response(
        StatusCode::OK,
        render_shell("Categories", &categories, None, &body),
    )
}
