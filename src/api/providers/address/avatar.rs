use crate::{address::AddressPath, errors::ApiError, server::state::AppState};
use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Answers with `302 Found` pointing at the provider's avatar.
pub async fn route(
    State(state): State<AppState>,
    Path(path): Path<AddressPath>,
) -> Result<Response, ApiError> {
    let url = state.resolver.get_provider_avatar_url(&path.address).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
