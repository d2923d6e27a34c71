use crate::errors::ApiError;
use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sentry::{Breadcrumb, Level, protocol::Event};
use tracing::{error, warn};

/// Puts every failed response into the JSON error shape.
///
/// The failure detail comes from the [`ApiError`] a handler attached to its
/// response, never from the body. Server-side detail is logged and reported,
/// clients only get the generic 500.
pub async fn error_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().to_string();
    let response = next.run(request).await;
    let status = response.status();

    if status == StatusCode::METHOD_NOT_ALLOWED {
        warn!(%method, %uri, "Method not allowed");
        return ApiError::method_not_allowed().into_response();
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let detail = response
        .extensions()
        .get::<ApiError>()
        .map(|api_error| api_error.message.clone());

    // timeouts count as backend failures
    if status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT {
        report_failure(&method, &uri, status, detail.as_deref());

        return ApiError::internal_server_error_user().into_response();
    }

    warn!(
        %method,
        %uri,
        %status,
        detail = detail.as_deref().unwrap_or("-"),
        "Client error"
    );

    response
}

fn report_failure(method: &Method, uri: &str, status: StatusCode, detail: Option<&str>) {
    let detail = detail.unwrap_or("no error detail attached");

    error!(%method, %uri, %status, detail, "Request failed");

    sentry::add_breadcrumb(Breadcrumb {
        category: Some("request".into()),
        message: Some(format!("{method} {uri}")),
        level: Level::Info,
        ..Default::default()
    });

    sentry::capture_event(Event {
        message: Some(format!("{status} on {method} {uri}: {detail}")),
        level: Level::Error,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        body::{Body, to_bytes},
        extract::Path,
        http::Request as HttpRequest,
        middleware::from_fn,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const AGENCY: &str = "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqyqqqqqqqqqsrlpmsc";
    const UNKNOWN: &str = "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqyqqqqqqqqpsvzwpm7";
    const UPSTREAM_DETAIL: &str = "Data source responded with 502 Bad Gateway";

    async fn provider(Path(address): Path<String>) -> Response {
        match address.as_str() {
            AGENCY => Json(json!({ "provider": AGENCY })).into_response(),
            UNKNOWN => ApiError::provider_not_found(UNKNOWN).into_response(),
            "slow" => StatusCode::REQUEST_TIMEOUT.into_response(),
            "plain" => (StatusCode::BAD_GATEWAY, "upstream said no").into_response(),
            _ => ApiError::invalid_address(&address).into_response(),
        }
    }

    async fn delegators_count() -> Result<Json<u64>, ApiError> {
        Err(ApiError::internal_server_error(UPSTREAM_DETAIL.to_string()))
    }

    fn router() -> Router {
        Router::new()
            .route("/providers/{address}", get(provider))
            .route(
                "/providers/{address}/delegators/count",
                get(delegators_count),
            )
            .layer(from_fn(error_middleware))
    }

    async fn call(method: Method, uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                HttpRequest::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn error_body(error: ApiError) -> Value {
        serde_json::to_value(error).unwrap()
    }

    #[rstest]
    #[case(format!("/providers/{AGENCY}"), StatusCode::OK, json!({ "provider": AGENCY }))]
    #[case(
        format!("/providers/{UNKNOWN}"),
        StatusCode::NOT_FOUND,
        error_body(ApiError::provider_not_found(UNKNOWN))
    )]
    #[case(
        "/providers/erd1abc".to_string(),
        StatusCode::BAD_REQUEST,
        error_body(ApiError::invalid_address("erd1abc"))
    )]
    #[case(
        format!("/providers/{AGENCY}/delegators/count"),
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body(ApiError::internal_server_error_user())
    )]
    #[case(
        "/providers/plain".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body(ApiError::internal_server_error_user())
    )]
    #[case(
        "/providers/slow".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body(ApiError::internal_server_error_user())
    )]
    #[tokio::test]
    async fn test_provider_routes(
        #[case] uri: String,
        #[case] expected_status: StatusCode,
        #[case] expected_body: Value,
    ) {
        let (status, body) = call(Method::GET, &uri).await;

        assert_eq!(status, expected_status);
        assert_eq!(body, expected_body);
    }

    #[tokio::test]
    async fn test_post_is_rejected_as_bad_request() {
        let (status, body) = call(Method::POST, &format!("/providers/{AGENCY}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, error_body(ApiError::method_not_allowed()));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_upstream_detail_is_logged_not_returned() {
        let (status, body) = call(Method::GET, &format!("/providers/{AGENCY}/delegators/count")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains(UPSTREAM_DETAIL));
        assert!(logs_contain(UPSTREAM_DETAIL));
    }
}
