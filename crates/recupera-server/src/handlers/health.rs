//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// `GET /healthz`
pub async fn handler() -> Json<Value> { Json(json!({ "ok": true })) }
