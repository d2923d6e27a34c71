use crate::{address::AddressPath, api::ApiResult, providers::Provider, server::state::AppState};
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn route(
    State(state): State<AppState>,
    Path(path): Path<AddressPath>,
) -> ApiResult<Provider> {
    let provider = state.resolver.get_provider(&path.address).await?;

    Ok(Json(provider))
}
