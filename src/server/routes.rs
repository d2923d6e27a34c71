pub mod hidden;
pub mod regular;

use super::state::AppState;
use axum::Router;

pub fn merge_routes(regular: Router<AppState>, hidden: Router<AppState>) -> Router<AppState> {
    regular.merge(hidden)
}
