//! HTTP layer for Recupera.
//!
//! Exposes an axum [`Router`] serving the intake form, the admin panel and
//! the JSON lead API, backed by any [`LeadStore`].

pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod session;

pub use config::ServerConfig;
pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  middleware,
  routing::{any, get, patch, post},
};
use recupera_core::store::LeadStore;
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{api_not_found, auth, health, leads, not_found, pages};
use session::SessionRegistry;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState<S: LeadStore> {
  pub store:    Arc<S>,
  pub config:   Arc<ServerConfig>,
  pub sessions: SessionRegistry,
}

impl<S: LeadStore> AppState<S> {
  pub fn new(store: S, config: ServerConfig) -> Self {
    let ttl = chrono::Duration::hours(i64::from(config.session_ttl_hours));
    Self {
      store:    Arc::new(store),
      config:   Arc::new(config),
      sessions: SessionRegistry::new(ttl),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the whole service.
///
/// Routes are matched top-down with the static file service as the final
/// fallback. The HTML pages are embedded rather than read from the static
/// root, so the fallback can never hand out the admin panel.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LeadStore + Clone + 'static,
{
  let static_files = ServeDir::new(&state.config.static_root);

  Router::new()
    // Pages
    .route("/",           get(pages::home).fallback(not_found))
    .route("/admin",      get(pages::admin).fallback(not_found))
    .route("/admin.html", get(pages::admin).fallback(not_found))
    // Session
    .route("/login",      post(auth::login::<S>).fallback(not_found))
    .route("/logout",     post(auth::logout::<S>).fallback(not_found))
    // Leads
    .route(
      "/api/leads",
      get(leads::list::<S>)
        .post(leads::create::<S>)
        .fallback(api_not_found),
    )
    .route(
      "/api/leads/{id}",
      patch(leads::update::<S>)
        .delete(leads::delete::<S>)
        .fallback(api_not_found),
    )
    .route("/api",         any(api_not_found))
    .route("/api/{*rest}", any(api_not_found))
    // Probes
    .route("/healthz",    get(health::handler).fallback(not_found))
    // Everything else
    .fallback_service(static_files)
    .layer(middleware::from_fn_with_state(
      state.sessions.clone(),
      session::middleware,
    ))
    .layer(middleware::from_fn(cors::middleware))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
