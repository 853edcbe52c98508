mod answer_provider;
mod field_repository;
mod interaction_repository;

pub use answer_provider::*;
pub use field_repository::*;
pub use interaction_repository::*;
