use axum::Json;
use axum::extract::State;

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let identity_mode = if state.actor_resolver.is_mock() {
        "mock"
    } else {
        "headers"
    };

    Json(HealthResponse {
        status: "ok",
        identity_mode,
    })
}
