//! Handlers for `/login` and `/logout`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/login` | Body: `{"user":"…","pass":"…"}`; sets the session cookie |
//! | `POST` | `/logout` | Always succeeds; clears the cookie |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use recupera_core::store::LeadStore;
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  error::Error,
  session::{presented_token, removal_cookie, session_cookie},
};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub user: String,
  #[serde(default)]
  pub pass: String,
}

/// `POST /login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
  body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
  S: LeadStore + Clone + 'static,
{
  let Json(body) = body?;

  if body.user != state.config.admin_username
    || body.pass != state.config.admin_password
  {
    tracing::warn!(user = %body.user, "rejected login");
    return Err(Error::InvalidCredentials);
  }

  // A fresh token on every login; any session the client already held ends.
  if let Some(old) = presented_token(&jar) {
    state.sessions.revoke(&old);
  }
  let token = state.sessions.create();
  let cookie = session_cookie(token, state.sessions.ttl(), &state.config);

  tracing::info!(user = %body.user, "admin logged in");
  Ok((jar.add(cookie), Json(json!({ "ok": true }))))
}

/// `POST /logout`
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
) -> impl IntoResponse
where
  S: LeadStore + Clone + 'static,
{
  if let Some(token) = presented_token(&jar)
    && state.sessions.revoke(&token)
  {
    tracing::info!("admin logged out");
  }
  (jar.remove(removal_cookie()), Json(json!({ "ok": true })))
}
