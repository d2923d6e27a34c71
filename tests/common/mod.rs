#![allow(dead_code)]

pub mod mock_data_source;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::HeaderMap},
};
use providers_api::{
    AppError,
    config::{Config, DataSource, DataSourceConfig},
    server::build,
};
use serde::de::DeserializeOwned;
use std::{
    path::PathBuf,
    sync::{Arc, LazyLock},
    time::Duration,
};
use tower::ServiceExt;
use tracing::Level;

pub const OWNER_ALICE: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
pub const OWNER_BOB: &str = "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx";
pub const PROVIDER_AGENCY: &str = "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqyqqqqqqqqqsrlpmsc";
pub const PROVIDER_EMPTY: &str = "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqyqqqqqqqqpqerxewd";
pub const PROVIDER_UNKNOWN: &str = "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqyqqqqqqqqpsvzwpm7";
pub const DELEGATOR_1: &str = "erd1f063yte5g42v2w7796ace54hu0gkqzkkx8pctfwhen3rcau9gkdqur9ha5";
pub const DELEGATOR_2: &str = "erd1m0qmfjgqlljg646mtkjuvwqyqyjlvhdslclzgj2twm4fsezhmxrq9fltfr";
pub const AGENCY_AVATAR: &str = "https://cdn.example.org/identities/staking_agency.png";

static INIT_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt::init();
});

pub fn initialize_logging() {
    let _ = *INIT_LOGGING;
}

pub fn snapshot_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("providers.json")
}

pub fn test_config(data_source: DataSource, no_metrics: bool) -> Arc<Config> {
    let config = Config {
        server_address: "0.0.0.0".parse().unwrap(),
        server_port: 3000,
        log_level: Level::INFO,
        no_metrics,
        data_source,
        sentry_dsn: None,
    };

    Arc::new(config)
}

pub async fn build_app() -> Result<Router, AppError> {
    build(test_config(DataSource::Snapshot(snapshot_path()), true)).await
}

pub async fn build_app_with_metrics() -> Result<Router, AppError> {
    build(test_config(DataSource::Snapshot(snapshot_path()), false)).await
}

pub async fn build_app_with_data_source(endpoint: String) -> Result<Router, AppError> {
    let data_source = DataSource::Http(DataSourceConfig {
        endpoint,
        request_timeout: Duration::from_secs(5),
    });

    build(test_config(data_source, true)).await
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Response body is not valid JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Request failed");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
