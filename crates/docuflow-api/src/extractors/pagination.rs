//! Pagination query extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use docuflow_core::types::pagination::PageRequest;

use crate::error::ApiError;

/// Query-string pagination parameters (`?page=2&page_size=50`).
///
/// Missing or malformed parameters fall back to the first default-sized
/// page rather than rejecting the request.
#[derive(Debug, Clone)]
pub struct Pagination(pub PageRequest);

#[derive(Debug, Default, Deserialize)]
struct RawPagination {
    page: Option<u64>,
    page_size: Option<u64>,
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = Query::<RawPagination>::from_request_parts(parts, state)
            .await
            .map(|Query(raw)| raw)
            .unwrap_or_default();

        let defaults = PageRequest::default();
        Ok(Self(PageRequest::new(
            raw.page.unwrap_or(defaults.page),
            raw.page_size.unwrap_or(defaults.page_size),
        )))
    }
}
