//! Error types for `recupera-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A submission failed a presence or type check. The message is meant for
  /// the submitting client.
  #[error("{0}")]
  Validation(String),

  #[error("unknown tipo: {0:?}")]
  UnknownTipo(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
