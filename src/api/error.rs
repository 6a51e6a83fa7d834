//! Mapping of catalog failures onto HTTP responses.
//!
//! A missing export file is a 404. Anything else is a 500 whose body carries
//! only a generic message; the cause goes to the log.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::models::ApiResponse;
use crate::catalog::{CatalogError, CatalogSource};

/// Failure while reading the catalog off the blocking pool.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("blocking thread pool is gone")]
    Blocking,
}

impl From<BlockingError> for FetchError {
    fn from(_: BlockingError) -> Self {
        FetchError::Blocking
    }
}

impl FetchError {
    pub fn is_missing(&self) -> bool {
        matches!(self, FetchError::Catalog(err) if err.is_missing())
    }
}

/// Run a catalog read on actix's blocking pool; the source re-parses files synchronously.
pub async fn fetch<T, F>(source: web::Data<dyn CatalogSource>, read: F) -> Result<T, FetchError>
where
    F: FnOnce(&dyn CatalogSource) -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    let result = web::block(move || read(source.get_ref())).await?;
    Ok(result?)
}

/// Which export file an endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Categories,
}

impl Resource {
    fn not_found(&self) -> &'static str {
        match self {
            Resource::Products => "Products file not found",
            Resource::Categories => "Categories file not found",
        }
    }

    fn failed(&self) -> &'static str {
        match self {
            Resource::Products => "Failed to fetch products",
            Resource::Categories => "Failed to fetch categories",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn from_fetch(resource: Resource, err: FetchError) -> Self {
        if err.is_missing() {
            tracing::warn!(error = %err, ?resource, "catalog source missing");
            ApiError::NotFound(resource.not_found())
        } else {
            tracing::error!(error = ?err, ?resource, "catalog read failed");
            ApiError::Internal(resource.failed())
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}
