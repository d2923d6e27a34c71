use crate::{address::AddressPath, api::ApiResult, server::state::AppState};
use axum::{
    Json,
    extract::{Path, State},
};

// Served under both `/delegators/count` and the hidden `/delegators/c`.
pub async fn route(State(state): State<AppState>, Path(path): Path<AddressPath>) -> ApiResult<u64> {
    let count = state
        .resolver
        .get_provider_delegators_count(&path.address)
        .await?;

    Ok(Json(count))
}
