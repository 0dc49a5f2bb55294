//! Handlers for `/api/leads` endpoints.
//!
//! | Method   | Path | Auth | Notes |
//! |----------|------|------|-------|
//! | `GET`    | `/api/leads` | yes | Most recent first |
//! | `POST`   | `/api/leads` | no  | Public intake form; 201 `{"ok":true,"id":N}` |
//! | `PATCH`  | `/api/leads/{id}` | yes | Body: `{"status"?, "notas"?}`; 404 if absent |
//! | `DELETE` | `/api/leads/{id}` | yes | 404 if absent |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use recupera_core::{
  lead::{Lead, LeadSubmission, LeadUpdate},
  store::LeadStore,
};
use serde_json::json;

use crate::{AppState, error::Error, session::Authenticated};

fn parse_id(raw: &str) -> Result<i64, Error> {
  raw
    .parse()
    .map_err(|_| Error::BadRequest(format!("id inválido: {raw}")))
}

fn lead_not_found(id: i64) -> Error {
  Error::NotFound(format!("lead {id} não encontrado"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/leads`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Lead>>, Error>
where
  S: LeadStore + Clone + 'static,
{
  let leads = state.store.list().await.map_err(Error::store)?;
  Ok(Json(leads))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/leads`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
  S: LeadStore + Clone + 'static,
{
  let Json(submission) = body?;
  let new_lead = submission.validate()?;

  let lead = state.store.create(new_lead).await.map_err(Error::store)?;
  tracing::info!(id = lead.id, tipo = %lead.tipo, "lead created");

  Ok((StatusCode::CREATED, Json(json!({ "ok": true, "id": lead.id }))))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /api/leads/{id}`
pub async fn update<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  body: Result<Json<LeadUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
  S: LeadStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  let Json(update) = body?;

  let lead = state
    .store
    .update(id, update)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| lead_not_found(id))?;
  tracing::info!(id, status = %lead.status, "lead updated");

  Ok(Json(json!({ "ok": true })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/leads/{id}`
pub async fn delete<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, Error>
where
  S: LeadStore + Clone + 'static,
{
  let id = parse_id(&id)?;

  if !state.store.delete(id).await.map_err(Error::store)? {
    return Err(lead_not_found(id));
  }
  tracing::info!(id, "lead deleted");

  Ok(Json(json!({ "ok": true })))
}
