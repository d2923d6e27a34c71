use super::{AGENCY_AVATAR, DELEGATOR_1, DELEGATOR_2, PROVIDER_AGENCY, PROVIDER_EMPTY};
use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Upstream providers API stand-in, listening on an ephemeral port.
pub struct MockDataSource {
    pub url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone)]
struct MockState {
    healthy: bool,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockState {
    fn record(&self, path: &str, query: Option<String>) -> Result<(), StatusCode> {
        let entry = match query {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };
        self.requests.lock().unwrap().push(entry);

        if self.healthy {
            Ok(())
        } else {
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

fn agency(with_identity_info: bool) -> Value {
    let mut provider = json!({
        "provider": PROVIDER_AGENCY,
        "stake": "4500000000000000000000",
        "identity": "staking_agency",
        "numUsers": 2
    });

    if with_identity_info {
        provider["name"] = json!("Staking Agency");
        provider["avatar"] = json!(AGENCY_AVATAR);
    }

    provider
}

async fn providers(
    State(state): State<MockState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, StatusCode> {
    state.record("/providers", query)?;

    Ok(Json(json!([agency(false)])))
}

async fn provider(
    State(state): State<MockState>,
    Path(address): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, StatusCode> {
    let with_identity_info = query
        .as_deref()
        .is_some_and(|q| q.contains("withIdentityInfo=true"));
    state.record(&format!("/providers/{address}"), query)?;

    if address == PROVIDER_AGENCY {
        Ok(Json(agency(with_identity_info)).into_response())
    } else if address == PROVIDER_EMPTY {
        Ok(Json(json!({ "provider": PROVIDER_EMPTY, "stake": "0" })).into_response())
    } else {
        Ok(StatusCode::NOT_FOUND.into_response())
    }
}

async fn delegators(
    State(state): State<MockState>,
    Path(address): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, StatusCode> {
    state.record(&format!("/providers/{address}/delegators"), query)?;

    if address == PROVIDER_AGENCY {
        Ok(Json(json!([
            { "address": DELEGATOR_1, "stake": "4000000000000000000000" },
            { "address": DELEGATOR_2, "stake": "500000000000000000000" }
        ]))
        .into_response())
    } else if address == PROVIDER_EMPTY {
        Ok(Json(json!([])).into_response())
    } else {
        Ok(StatusCode::NOT_FOUND.into_response())
    }
}

async fn delegators_count(
    State(state): State<MockState>,
    Path(address): Path<String>,
) -> Result<Json<u64>, StatusCode> {
    state.record(&format!("/providers/{address}/delegators/count"), None)?;

    Ok(Json(if address == PROVIDER_AGENCY { 2 } else { 0 }))
}

impl MockDataSource {
    pub async fn healthy() -> Self {
        Self::start(true).await
    }

    pub async fn failing() -> Self {
        Self::start(false).await
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    async fn start(healthy: bool) -> Self {
        let requests = Arc::new(Mutex::new(vec![]));
        let state = MockState {
            healthy,
            requests: requests.clone(),
        };

        let mock_app = Router::new()
            .route("/api/providers", get(providers))
            .route("/api/providers/{address}", get(provider))
            .route("/api/providers/{address}/delegators", get(delegators))
            .route(
                "/api/providers/{address}/delegators/count",
                get(delegators_count),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{addr}/api/");

        tokio::spawn(async move {
            axum::serve(listener, mock_app).await.unwrap();
        });

        Self { url, requests }
    }
}
