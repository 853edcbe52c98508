mod duckdb_field_repository;
mod duckdb_interaction_repository;
mod http_answer_provider;
pub mod http_api;
mod mock_answer_provider;

pub use duckdb_field_repository::*;
pub use duckdb_interaction_repository::*;
pub use http_answer_provider::*;
pub use mock_answer_provider::*;
