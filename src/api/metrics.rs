use crate::errors::ApiError;
use axum::response::{Extension, IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;

pub async fn route(
    Extension(prometheus_handle): Extension<Arc<RwLock<PrometheusHandle>>>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = prometheus_handle.read().await;

    Ok(handle.render().into_response())
}
