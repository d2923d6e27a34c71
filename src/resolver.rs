use crate::{
    address::validate_address,
    errors::ApiError,
    pagination::{Pagination, PaginationQuery},
    providers::{Provider, ProviderDelegator, ProvidersQuery},
    source::ProviderSource,
};
use std::sync::Arc;
use tracing::debug;

/// Turns raw request parameters into source calls and maps absence to errors.
///
/// Validation always happens before the source is touched. Single-entity
/// lookups treat absence as [`ApiError::provider_not_found`], while list
/// lookups return whatever the source yields, empty included.
#[derive(Clone)]
pub struct ProviderQueryResolver {
    source: Arc<dyn ProviderSource>,
}

impl ProviderQueryResolver {
    pub fn new(source: Arc<dyn ProviderSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub async fn list_providers(&self, query: ProvidersQuery) -> Result<Vec<Provider>, ApiError> {
        let (filter, options) = query.into_filter_and_options()?;

        debug!(?filter, ?options, "Listing providers");

        self.source.find_many(&filter, &options).await
    }

    pub async fn get_provider(&self, address: &str) -> Result<Provider, ApiError> {
        let address = validate_address(address)?;

        self.source
            .find_one(&address)
            .await?
            .ok_or_else(|| ApiError::provider_not_found(&address))
    }

    /// The address is passed through unvalidated, unlike every other lookup.
    pub async fn get_provider_avatar_url(&self, address: &str) -> Result<String, ApiError> {
        match self.source.avatar_url(address).await? {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ApiError::avatar_not_found()),
        }
    }

    pub async fn get_provider_delegators(
        &self,
        address: &str,
        pagination_query: PaginationQuery,
    ) -> Result<Vec<ProviderDelegator>, ApiError> {
        let address = validate_address(address)?;
        let pagination = Pagination::from_query(pagination_query)?;

        self.source
            .delegators(&address, &pagination)
            .await?
            .ok_or_else(|| ApiError::provider_not_found(&address))
    }

    /// Unlike the delegators list, an unknown provider is not an error here.
    pub async fn get_provider_delegators_count(&self, address: &str) -> Result<u64, ApiError> {
        let address = validate_address(address)?;

        self.source.delegators_count(&address).await
    }
}
