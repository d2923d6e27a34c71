use crate::{api::ApiResult, providers::{Provider, ProvidersQuery}, server::state::AppState};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

pub async fn route(
    State(state): State<AppState>,
    query: Result<Query<ProvidersQuery>, QueryRejection>,
) -> ApiResult<Vec<Provider>> {
    let Query(query) = query?;
    let providers = state.resolver.list_providers(query).await?;

    Ok(Json(providers))
}
