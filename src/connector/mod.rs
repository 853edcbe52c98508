//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Storage (DuckDB for field configuration and interactions)
//! - Answer provider service (HTTP, plus an offline mock)
//! - Inbound HTTP API and CLI controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
