//! The `LeadStore` trait.
//!
//! Implemented by storage backends (e.g. `recupera-store-sqlite`). The server
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::lead::{Lead, LeadUpdate, NewLead};

/// Abstraction over a lead store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new lead. The store assigns the id and both timestamps.
  fn create(
    &self,
    input: NewLead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Retrieve a lead by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// All leads, most recently created first.
  fn list(&self) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + '_;

  /// Apply a partial update and refresh `updated_at`.
  ///
  /// Returns `None` if no lead has this id; no other row is touched.
  fn update(
    &self,
    id: i64,
    update: LeadUpdate,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// Remove a lead. Returns whether a row was removed; absence is not an
  /// error.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
