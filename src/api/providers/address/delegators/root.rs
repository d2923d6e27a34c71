use crate::{
    address::AddressPath, api::ApiResult, pagination::PaginationQuery,
    providers::ProviderDelegator, server::state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};

pub async fn route(
    State(state): State<AppState>,
    pagination_query: Result<Query<PaginationQuery>, QueryRejection>,
    Path(path): Path<AddressPath>,
) -> ApiResult<Vec<ProviderDelegator>> {
    let Query(pagination_query) = pagination_query?;

    let delegators = state
        .resolver
        .get_provider_delegators(&path.address, pagination_query)
        .await?;

    Ok(Json(delegators))
}
