use crate::{
    api::{metrics, providers, root},
    middlewares::metrics::track_http_metrics,
    server::state::AppState,
};
use axum::{Router, middleware::from_fn, routing::get};

/// Documented API routes
#[rustfmt::skip]
pub fn get_regular_api_routes(enable_metrics: bool) -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(root::route))

        // providers
        .route("/providers", get(providers::root::route))
        .route("/providers/{address}", get(providers::address::root::route))
        .route("/providers/{address}/avatar", get(providers::address::avatar::route))
        .route("/providers/{address}/delegators", get(providers::address::delegators::root::route))
        .route("/providers/{address}/delegators/count", get(providers::address::delegators::count::route));

    if enable_metrics {
        router = router
            .route("/metrics", get(metrics::route))
            .route_layer(from_fn(track_http_metrics));
    }

    router
}
