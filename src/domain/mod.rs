//! # Domain Layer
//!
//! Core models and error types for the relay.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
