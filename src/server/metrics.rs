use metrics::{describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::warn;

pub fn spawn_process_collector() {
    tokio::spawn(async {
        let collector = metrics_process::Collector::default();
        collector.describe();

        loop {
            collector.collect();
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    });
}

// to prevent multiple initialization of the metrics recorder, happens in tests
static HANDLER: OnceLock<Option<Arc<RwLock<PrometheusHandle>>>> = OnceLock::new();

/// Installs the global Prometheus recorder once. Returns `None` if another
/// recorder was installed first.
pub fn setup_metrics_recorder() -> Option<Arc<RwLock<PrometheusHandle>>> {
    HANDLER.get_or_init(internal_setup).clone()
}

fn internal_setup() -> Option<Arc<RwLock<PrometheusHandle>>> {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {e}");
            return None;
        },
    };

    describe_counter!(
        "http_requests_total",
        "HTTP calls made to the providers API"
    );

    describe_gauge!(
        "providers_api_info",
        "Always 1, labelled with the running version"
    );
    // Set right away so it shows under `GET /metrics` before any traffic
    gauge!("providers_api_info", "version" => env!("CARGO_PKG_VERSION")).set(1);

    Some(Arc::new(RwLock::new(handle)))
}
