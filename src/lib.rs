pub mod address;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod json_client;
pub mod middlewares;
pub mod pagination;
pub mod providers;
pub mod resolver;
pub mod server;
pub mod source;
pub mod types;

pub use errors::{ApiError, AppError};
