//! Core types and trait definitions for the Recupera lead store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the server depend on it.

pub mod error;
pub mod lead;
pub mod store;

pub use error::{Error, Result};
