//! Request counter controller.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};

/// Creates the counter router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_request_count))
}

/// Current request counter value, as a bare integer.
#[utoipa::path(
    get,
    path = "/api/counter",
    tag = "counter",
    responses(
        (status = 200, description = "Number of service invocations so far", body = u64)
    )
)]
pub async fn get_request_count(State(state): State<AppState>) -> Json<u64> {
    Json(state.request_counter.count())
}
