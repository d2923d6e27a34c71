use super::{ProviderSource, SourceResult};
use crate::{
    config::DataSourceConfig,
    errors::AppError,
    json_client::JsonClient,
    pagination::{ApplyPagination, Pagination},
    providers::{Provider, ProviderDelegator, ProviderFilter, ProviderQueryOptions},
};
use async_trait::async_trait;
use reqwest::Url;

/// Forwards provider queries to an upstream JSON API.
#[derive(Clone, Debug)]
pub struct HttpProviderSource {
    pub client: JsonClient,
}

impl HttpProviderSource {
    pub fn new(config: &DataSourceConfig) -> Result<Self, AppError> {
        let url = Url::parse(&config.endpoint).map_err(|e| AppError::DataSource(e.to_string()))?;
        let client = JsonClient::new(url, config.request_timeout)?;

        Ok(Self { client })
    }
}

fn apply_filter(url: &mut Url, filter: &ProviderFilter, options: &ProviderQueryOptions) {
    let mut query = url.query_pairs_mut();

    if let Some(identity) = &filter.identity {
        query.append_pair("identity", identity);
    }

    if let Some(owner) = &filter.owner {
        query.append_pair("owner", owner);
    }

    if let Some(providers) = &filter.providers {
        query.append_pair("providers", &providers.join(","));
    }

    query
        .append_pair("withIdentityInfo", &options.with_identity_info.to_string())
        .append_pair("withLatestInfo", &options.with_latest_info.to_string());
}

#[async_trait]
impl ProviderSource for HttpProviderSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn find_many(
        &self,
        filter: &ProviderFilter,
        options: &ProviderQueryOptions,
    ) -> SourceResult<Vec<Provider>> {
        let mut url = self.client.endpoint(&["providers"])?;
        apply_filter(&mut url, filter, options);

        self.client.get(url).await
    }

    async fn find_one(&self, address: &str) -> SourceResult<Option<Provider>> {
        let url = self.client.endpoint(&["providers", address])?;

        self.client.get_optional(url).await
    }

    async fn avatar_url(&self, address: &str) -> SourceResult<Option<String>> {
        let mut url = self.client.endpoint(&["providers", address])?;
        url.query_pairs_mut().append_pair("withIdentityInfo", "true");

        let provider: Option<Provider> = self.client.get_optional(url).await?;

        Ok(provider.and_then(|p| p.avatar))
    }

    async fn delegators(
        &self,
        address: &str,
        pagination: &Pagination,
    ) -> SourceResult<Option<Vec<ProviderDelegator>>> {
        let mut url = self.client.endpoint(&["providers", address, "delegators"])?;
        url.apply_pagination(pagination);

        self.client.get_optional(url).await
    }

    async fn delegators_count(&self, address: &str) -> SourceResult<u64> {
        let url = self
            .client
            .endpoint(&["providers", address, "delegators", "count"])?;

        self.client.get(url).await
    }
}
