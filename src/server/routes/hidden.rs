use crate::{
    api::providers, middlewares::metrics::track_http_metrics, server::state::AppState,
};
use axum::{Router, middleware::from_fn, routing::get};

/// Undocumented aliases kept for older clients
pub fn get_hidden_api_routes(enable_metrics: bool) -> Router<AppState> {
    let mut router = Router::new().route(
        "/providers/{address}/delegators/c",
        get(providers::address::delegators::count::route),
    );

    if enable_metrics {
        router = router.route_layer(from_fn(track_http_metrics));
    }

    router
}
