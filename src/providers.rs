use crate::{
    address::{get_address_list_param, get_address_param},
    errors::ApiError,
};
use serde::{Deserialize, Serialize};

/// Raw `GET /providers` query string, before any validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvidersQuery {
    pub identity: Option<String>,
    pub owner: Option<String>,
    pub providers: Option<String>,
    pub with_identity_info: Option<String>,
    pub with_latest_info: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(alias = "address")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub stake: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_cap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_nodes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulated_rewards: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    // identity info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Provider {
    pub fn without_identity_info(self) -> Self {
        Self {
            name: None,
            description: None,
            website: None,
            twitter: None,
            location: None,
            avatar: None,
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderDelegator {
    pub address: String,
    pub stake: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFilter {
    pub identity: Option<String>,
    pub owner: Option<String>,
    pub providers: Option<Vec<String>>,
}

impl ProviderFilter {
    pub fn matches(&self, provider: &Provider) -> bool {
        if let Some(identity) = &self.identity {
            if provider.identity.as_ref() != Some(identity) {
                return false;
            }
        }

        if let Some(owner) = &self.owner {
            if provider.owner.as_ref() != Some(owner) {
                return false;
            }
        }

        if let Some(providers) = &self.providers {
            if !providers.contains(&provider.provider) {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderQueryOptions {
    pub with_identity_info: bool,
    pub with_latest_info: bool,
    /// Set for owner-scoped queries so that the source can enrich with owner context.
    pub owner_address: Option<String>,
}

impl ProviderQueryOptions {
    pub fn apply_default_options(
        owner: Option<&str>,
        with_identity_info: Option<bool>,
        with_latest_info: Option<bool>,
    ) -> Self {
        let defaults = Self::default();

        Self {
            with_identity_info: with_identity_info.unwrap_or(defaults.with_identity_info),
            with_latest_info: with_latest_info.unwrap_or(defaults.with_latest_info),
            owner_address: owner.map(str::to_string),
        }
    }
}

impl ProvidersQuery {
    /// Validates the raw query into a canonical filter and options pair.
    pub fn into_filter_and_options(
        self,
    ) -> Result<(ProviderFilter, ProviderQueryOptions), ApiError> {
        let owner = get_address_param(self.owner)?;
        let providers = get_address_list_param(self.providers)?;
        let with_identity_info = get_bool_param("withIdentityInfo", self.with_identity_info)?;
        let with_latest_info = get_bool_param("withLatestInfo", self.with_latest_info)?;

        let options = ProviderQueryOptions::apply_default_options(
            owner.as_deref(),
            with_identity_info,
            with_latest_info,
        );

        let filter = ProviderFilter {
            identity: self.identity,
            owner,
            providers,
        };

        Ok((filter, options))
    }
}

pub fn get_bool_param(name: &str, param: Option<String>) -> Result<Option<bool>, ApiError> {
    match param.as_deref() {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(_) => Err(ApiError::custom_400(format!(
            "querystring/{name} must be boolean"
        ))),
    }
}
