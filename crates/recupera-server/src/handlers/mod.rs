pub mod auth;
pub mod health;
pub mod leads;
pub mod pages;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};

use crate::error::Error;

/// Fallback for anything under `/api` that no route claims.
pub async fn api_not_found() -> Error {
  Error::NotFound("Not found".to_owned())
}

/// Fallback for a known non-API path hit with the wrong method.
pub async fn not_found() -> Response {
  (StatusCode::NOT_FOUND, "Not Found").into_response()
}
