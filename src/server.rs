pub mod logging;
pub mod metrics;
pub mod routes;
pub mod state;

use crate::{
    config::{Config, DataSource},
    errors::{ApiError, AppError},
    middlewares::errors::error_middleware,
    resolver::ProviderQueryResolver,
    source::{HttpProviderSource, ProviderSource, SnapshotProviderSource},
};
use axum::{Extension, Router, middleware::from_fn};
use self::metrics::{setup_metrics_recorder, spawn_process_collector};
use routes::{hidden::get_hidden_api_routes, merge_routes, regular::get_regular_api_routes};
use state::AppState;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;

/// Creates the provider source named by the configuration.
pub fn build_source(config: &Config) -> Result<Arc<dyn ProviderSource>, AppError> {
    let source: Arc<dyn ProviderSource> = match &config.data_source {
        DataSource::Http(data_source) => {
            info!(endpoint = %data_source.endpoint, "Using upstream data source");
            Arc::new(HttpProviderSource::new(data_source)?)
        },
        DataSource::Snapshot(path) => Arc::new(SnapshotProviderSource::from_file(path)?),
    };

    Ok(source)
}

/// Builds and configures the Axum `Router`.
/// Returns `Ok(Router)` on success or an `AppError` if a step fails.
pub async fn build(config: Arc<Config>) -> Result<Router, AppError> {
    let source = build_source(&config)?;

    build_with_source(config, source)
}

/// Same as [`build`], with the provider source supplied by the caller.
pub fn build_with_source(
    config: Arc<Config>,
    source: Arc<dyn ProviderSource>,
) -> Result<Router, AppError> {
    // Setting up the metrics recorder needs to be the very first step before
    // doing anything that uses metrics, or the initial data will be lost:
    let metrics_handle = if !config.no_metrics {
        let recorder = setup_metrics_recorder().ok_or_else(|| {
            AppError::Server("Prometheus recorder could not be installed".to_string())
        })?;
        spawn_process_collector();

        Some(recorder)
    } else {
        None
    };

    let regular_api_routes = get_regular_api_routes(!config.no_metrics);
    let hidden_api_routes = get_hidden_api_routes(!config.no_metrics);
    let api_routes = merge_routes(regular_api_routes, hidden_api_routes);

    let app_state = AppState {
        resolver: Arc::new(ProviderQueryResolver::new(source)),
    };

    let inner = {
        let mut routes = api_routes
            .with_state(app_state)
            .fallback(ApiError::not_found())
            .layer(from_fn(error_middleware));

        if let Some(prom_handler) = metrics_handle {
            routes = routes.layer(Extension(prom_handler));
        }

        routes
    };

    let inner = NormalizePathLayer::trim_trailing_slash().layer(inner);
    let app = Router::new().fallback_service(inner);

    Ok(app)
}
