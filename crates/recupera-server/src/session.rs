//! Cookie-backed sessions and the `Authenticated` guard.
//!
//! A session is an opaque random token held in the `recupera_session` cookie
//! and registered in an in-process [`SessionRegistry`] with an absolute
//! expiry. Sessions do not survive a restart.

use std::sync::Arc;

use axum::{
  extract::{FromRequestParts, Request, State},
  http::request::Parts,
  middleware::Next,
  response::Response,
};
use axum_extra::extract::{
  CookieJar,
  cookie::{Cookie, SameSite},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand_core::{OsRng, RngCore};

use crate::{config::ServerConfig, error::Error};

pub const SESSION_COOKIE: &str = "recupera_session";

// ─── Registry ────────────────────────────────────────────────────────────────

/// Live sessions keyed by token, valued by expiry.
///
/// Cloning is cheap; all clones share the same map.
#[derive(Clone)]
pub struct SessionRegistry {
  sessions: Arc<DashMap<String, DateTime<Utc>>>,
  ttl:      Duration,
}

impl SessionRegistry {
  pub fn new(ttl: Duration) -> Self {
    Self { sessions: Arc::new(DashMap::new()), ttl }
  }

  pub fn ttl(&self) -> Duration { self.ttl }

  /// Open a new authenticated session and return its token.
  pub fn create(&self) -> String {
    self.purge_expired();
    let token = new_token();
    self.sessions.insert(token.clone(), Utc::now() + self.ttl);
    token
  }

  /// Whether `token` names a live session. Expired entries are evicted.
  pub fn is_valid(&self, token: &str) -> bool {
    let expires_at = self.sessions.get(token).map(|entry| *entry.value());
    match expires_at {
      Some(at) if at > Utc::now() => true,
      Some(_) => {
        self.sessions.remove(token);
        false
      }
      None => false,
    }
  }

  /// Destroy a session. Returns whether it existed.
  pub fn revoke(&self, token: &str) -> bool {
    self.sessions.remove(token).is_some()
  }

  pub fn purge_expired(&self) {
    let now = Utc::now();
    self.sessions.retain(|_, expires_at| *expires_at > now);
  }

  pub fn len(&self) -> usize { self.sessions.len() }

  pub fn is_empty(&self) -> bool { self.sessions.is_empty() }
}

fn new_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

// ─── Cookies ─────────────────────────────────────────────────────────────────

/// The cookie handed out on a successful login.
pub fn session_cookie(
  token:  String,
  ttl:    Duration,
  config: &ServerConfig,
) -> Cookie<'static> {
  Cookie::build((SESSION_COOKIE, token))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(config.cookie_secure)
    .max_age(time::Duration::seconds(ttl.num_seconds()))
    .build()
}

/// A cookie that clears the session cookie on the client.
pub fn removal_cookie() -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE).path("/").build()
}

/// The session token the client presented, whether or not it is still live.
pub fn presented_token(jar: &CookieJar) -> Option<String> {
  jar.get(SESSION_COOKIE).map(|c| c.value().to_owned())
}

// ─── Middleware & guard ──────────────────────────────────────────────────────

/// Attached to request extensions by [`middleware`] when the request carries
/// a live session cookie.
#[derive(Debug, Clone, Copy)]
pub struct CurrentSession;

/// Resolve the session cookie against the registry before routing.
pub async fn middleware(
  State(sessions): State<SessionRegistry>,
  mut req: Request,
  next: Next,
) -> Response {
  let jar = CookieJar::from_headers(req.headers());
  if let Some(token) = presented_token(&jar)
    && sessions.is_valid(&token)
  {
    req.extensions_mut().insert(CurrentSession);
  }
  next.run(req).await
}

/// Zero-size marker: present in the handler means the request carried a live
/// session. Rejects with 401 before the handler body runs.
pub struct Authenticated;

impl<S> FromRequestParts<S> for Authenticated
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<CurrentSession>()
      .map(|_| Authenticated)
      .ok_or(Error::Unauthorized)
  }
}
