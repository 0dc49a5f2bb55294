//! Permissive cross-origin pass-through.
//!
//! Every response gets `Access-Control-Allow-Origin: *`. Preflight `OPTIONS`
//! requests never reach the router; they are answered here with 204.

use axum::{
  extract::Request,
  http::{HeaderValue, Method, StatusCode, header},
  middleware::Next,
  response::{IntoResponse, Response},
};

const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

pub async fn middleware(req: Request, next: Next) -> Response {
  let mut res = if req.method() == Method::OPTIONS {
    (
      StatusCode::NO_CONTENT,
      [
        (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
      ],
    )
      .into_response()
  } else {
    next.run(req).await
  };

  res.headers_mut().insert(
    header::ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderValue::from_static("*"),
  );
  res
}
