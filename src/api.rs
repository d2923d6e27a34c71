pub mod metrics;
pub mod providers;
pub mod root;

pub use crate::types::ApiResult;
