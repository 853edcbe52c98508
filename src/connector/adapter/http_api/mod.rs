mod dto;
mod error;
mod server;

pub use dto::*;
pub use error::ApiError;
pub use server::{RelayHttpServer, API_TOKEN_ENV, USER_ID_HEADER};
