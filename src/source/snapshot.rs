use super::{ProviderSource, SourceResult};
use crate::{
    errors::AppError,
    pagination::Pagination,
    providers::{Provider, ProviderDelegator, ProviderFilter, ProviderQueryOptions},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};
use tracing::info;

/// On-disk shape of a providers snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub providers: Vec<Provider>,
    /// Delegators keyed by provider address.
    #[serde(default)]
    pub delegators: HashMap<String, Vec<ProviderDelegator>>,
}

/// Serves providers from a static, in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProviderSource {
    snapshot: Snapshot,
}

impl SnapshotProviderSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Loads a snapshot file. `.toml` files are read as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let data = fs::read_to_string(path).map_err(|e| {
            AppError::DataSource(format!(
                "Failed to read providers snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        let parsed: Result<Snapshot, String> = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&data).map_err(|e| e.to_string()),
            _ => serde_json::from_str(&data).map_err(|e| e.to_string()),
        };

        let snapshot = parsed.map_err(|e| {
            AppError::DataSource(format!(
                "Failed to parse providers snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            path = %path.display(),
            providers = snapshot.providers.len(),
            "Loaded providers snapshot"
        );

        Ok(Self::new(snapshot))
    }

    fn provider(&self, address: &str) -> Option<&Provider> {
        self.snapshot
            .providers
            .iter()
            .find(|p| p.provider == address)
    }
}

#[async_trait]
impl ProviderSource for SnapshotProviderSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn find_many(
        &self,
        filter: &ProviderFilter,
        options: &ProviderQueryOptions,
    ) -> SourceResult<Vec<Provider>> {
        // `with_latest_info` has nothing to refresh in a static snapshot.
        let providers = self
            .snapshot
            .providers
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .map(|p| {
                if options.with_identity_info {
                    p
                } else {
                    p.without_identity_info()
                }
            })
            .collect();

        Ok(providers)
    }

    async fn find_one(&self, address: &str) -> SourceResult<Option<Provider>> {
        Ok(self.provider(address).cloned())
    }

    async fn avatar_url(&self, address: &str) -> SourceResult<Option<String>> {
        Ok(self.provider(address).and_then(|p| p.avatar.clone()))
    }

    async fn delegators(
        &self,
        address: &str,
        pagination: &Pagination,
    ) -> SourceResult<Option<Vec<ProviderDelegator>>> {
        if self.provider(address).is_none() {
            return Ok(None);
        }

        let delegators = self
            .snapshot
            .delegators
            .get(address)
            .map(|all| pagination.window(all).to_vec())
            .unwrap_or_default();

        Ok(Some(delegators))
    }

    async fn delegators_count(&self, address: &str) -> SourceResult<u64> {
        let count = self
            .snapshot
            .delegators
            .get(address)
            .map_or(0, |all| all.len());

        Ok(count as u64)
    }
}
