// HTTP request handlers for API endpoints

use crate::api::error::{fetch, ApiError, Resource};
use crate::api::models::*;
use crate::catalog::{CatalogSource, ListingParams};
use actix_web::{web, HttpResponse};

/// Health check endpoint
pub async fn health_check(source: web::Data<dyn CatalogSource>) -> HttpResponse {
    let health = source.health();
    let status = if health.products && health.categories {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(ApiResponse::success(HealthResponse {
        status: status.to_string(),
        products_file: health.products,
        categories_file: health.categories,
    }))
}

/// Paginated product listing: `GET /api/products?page&limit&category&search`
pub async fn list_products(
    params: web::Query<ListingParams>,
    source: web::Data<dyn CatalogSource>,
) -> Result<HttpResponse, ApiError> {
    let query = params.into_inner().to_query();
    tracing::debug!(?query, "product listing requested");

    let products = fetch(source, |s| s.list_products())
        .await
        .map_err(|e| ApiError::from_fetch(Resource::Products, e))?;
    let page = query.apply(products);

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}

/// Flat category list: `GET /api/categories`
pub async fn list_categories(
    source: web::Data<dyn CatalogSource>,
) -> Result<HttpResponse, ApiError> {
    let categories = fetch(source, |s| s.list_categories())
        .await
        .map_err(|e| ApiError::from_fetch(Resource::Categories, e))?;

    let data: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::configure_routes;
    use crate::catalog::{CatalogError, Category, CsvCatalog, Product, SourceHealth};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct Unreadable;

    impl CatalogSource for Unreadable {
        fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Io {
                path: PathBuf::from("/srv/shop/products.csv"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
            Err(CatalogError::Io {
                path: PathBuf::from("/srv/shop/categories.csv"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn health(&self) -> SourceHealth {
            SourceHealth {
                products: true,
                categories: true,
            }
        }
    }

    fn seeded_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut products = String::from("ID,post_title,post_name,regular_price,stock,tax:product_cat,tax:product_brand\n");
        for i in 1..=25 {
            let category = if i % 5 == 0 { "Baking" } else { "cutting" };
            products.push_str(&format!("{i},Item {i},item-{i},{i}.50,0,{category},Forge\n"));
        }
        products.push_str("26,Broken,broken,0,1,cutting,\n");
        fs::write(dir.path().join("products.csv"), products).unwrap();
        fs::write(
            dir.path().join("categories.csv"),
            "term_id,name,slug,description\n1,Uncategorized,uncategorized,\n2,Cutting,cutting,Knives\n3,Baking,baking,\n",
        )
        .unwrap();
        dir
    }

    fn data_for(source: Arc<dyn CatalogSource>) -> web::Data<dyn CatalogSource> {
        web::Data::from(source)
    }

    async fn get_json(source: Arc<dyn CatalogSource>, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(data_for(source))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn products_are_filtered_and_paginated() {
        let dir = seeded_dir();
        let source: Arc<dyn CatalogSource> = Arc::new(CsvCatalog::new(dir.path()));

        let (status, body) = get_json(source.clone(), "/api/products?page=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["total"], 25);
        assert_eq!(body["pagination"]["totalPages"], 3);
        assert_eq!(body["data"][0]["stock"], 100);

        let (_, body) = get_json(source.clone(), "/api/products?category=Cutting&limit=50").await;
        assert_eq!(body["pagination"]["total"], 20);
        assert_eq!(body["pagination"]["limit"], 50);

        let (_, body) = get_json(source, "/api/products?search=item%2012").await;
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["slug"], "item-12");
    }

    #[actix_web::test]
    async fn categories_exclude_sentinel_and_default_description() {
        let dir = seeded_dir();
        let source: Arc<dyn CatalogSource> = Arc::new(CsvCatalog::new(dir.path()));

        let (status, body) = get_json(source, "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Cutting", "Baking"]);
        assert_eq!(body["data"][1]["description"], "");
    }

    #[actix_web::test]
    async fn missing_files_answer_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source: Arc<dyn CatalogSource> = Arc::new(CsvCatalog::new(dir.path()));

        let (status, body) = get_json(source.clone(), "/api/products").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Products file not found");

        let (status, body) = get_json(source.clone(), "/api/categories").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Categories file not found");

        let (status, body) = get_json(source, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "degraded");
    }

    #[actix_web::test]
    async fn read_failures_answer_generic_internal_error() {
        let source: Arc<dyn CatalogSource> = Arc::new(Unreadable);

        let (status, body) = get_json(source.clone(), "/api/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch products");
        assert!(!body.to_string().contains("/srv/shop"));

        let (status, body) = get_json(source, "/api/categories").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch categories");
    }
}
