use crate::errors::{ApiError, AppError};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Clone, Debug)]
pub struct JsonClient {
    base_url: Url,
    client: Client,
}

impl JsonClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::DataSource(format!(
                "'{base_url}' cannot be used as a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Server(format!("failed to build client: {e}")))?;

        Ok(Self { base_url, client })
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ApiError::internal_server_error("Invalid data source URL".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// GET that treats an upstream 404 as absence.
    pub async fn get_optional<T>(&self, url: Url) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url_str = url.to_string();
        let resp = self.client.request(Method::GET, url).send().await?;
        let status = resp.status();

        debug!(url = %url_str, %status, "JsonClient GET");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body_text = resp.text().await?;

        if !status.is_success() {
            error!(
                url = %url_str,
                status = %status,
                response_body = %body_text,
                "JsonClient received an unsuccessful response"
            );

            return Err(ApiError::internal_server_error(format!(
                "Data source responded with {status}"
            )));
        }

        let body: T = serde_json::from_str(&body_text).map_err(|e| {
            error!(
                url = %url_str,
                status = %status,
                response_body = %body_text,
                error = %e,
                "JsonClient failed to parse response"
            );
            e
        })?;

        Ok(Some(body))
    }

    /// GET where an upstream 404 is an error too.
    pub async fn get<T>(&self, url: Url) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url_str = url.to_string();

        self.get_optional(url).await?.ok_or_else(|| {
            ApiError::internal_server_error(format!("Data source has no resource at {url_str}"))
        })
    }
}
