//! Error types and axum `IntoResponse` implementation.
//!
//! Every error renders as `{"ok": false, "error": "<message>"}`.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Não autorizado")]
  Unauthorized,
  #[error("Login inválido")]
  InvalidCredentials,
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  BadRequest(String),
  #[error("{0}")]
  Validation(#[from] recupera_core::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(e))
  }
}

impl From<JsonRejection> for Error {
  fn from(rejection: JsonRejection) -> Self {
    Error::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Unauthorized | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::Store(_) => {
        tracing::error!(error = %self, "request failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let message = if status.is_server_error() {
      "Erro interno".to_owned()
    } else {
      self.to_string()
    };

    (status, Json(json!({ "ok": false, "error": message }))).into_response()
  }
}
