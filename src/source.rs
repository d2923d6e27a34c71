pub mod http;
pub mod snapshot;

use crate::{
    errors::ApiError,
    pagination::Pagination,
    providers::{Provider, ProviderDelegator, ProviderFilter, ProviderQueryOptions},
};
use async_trait::async_trait;

pub use http::HttpProviderSource;
pub use snapshot::SnapshotProviderSource;

pub type SourceResult<T> = Result<T, ApiError>;

/// Backend that owns provider data.
///
/// Absence is reported as `None` rather than as an error, so that callers can
/// decide whether a missing entity is a not-found or an empty result. Any
/// `Err` is an upstream failure and is passed through untouched.
#[async_trait]
pub trait ProviderSource: Send + Sync + 'static {
    /// Short label for logs and `GET /`.
    fn name(&self) -> &'static str;

    async fn find_many(
        &self,
        filter: &ProviderFilter,
        options: &ProviderQueryOptions,
    ) -> SourceResult<Vec<Provider>>;

    async fn find_one(&self, address: &str) -> SourceResult<Option<Provider>>;

    async fn avatar_url(&self, address: &str) -> SourceResult<Option<String>>;

    async fn delegators(
        &self,
        address: &str,
        pagination: &Pagination,
    ) -> SourceResult<Option<Vec<ProviderDelegator>>>;

    async fn delegators_count(&self, address: &str) -> SourceResult<u64>;
}
