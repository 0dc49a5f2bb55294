//! The two HTML pages served by explicit routes.
//!
//! Both pages are compiled into the binary and live outside the static root,
//! so the guarded handler is the only way to reach the admin panel however
//! the request path is spelled.

use axum::response::Html;

use crate::session::Authenticated;

const HOME_PAGE: &str = include_str!("../../pages/index.html");
const ADMIN_PAGE: &str = include_str!("../../pages/admin.html");

/// `GET /`
pub async fn home() -> Html<&'static str> { Html(HOME_PAGE) }

/// `GET /admin`, `GET /admin.html`
pub async fn admin(_auth: Authenticated) -> Html<&'static str> {
  Html(ADMIN_PAGE)
}
