use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        links: state.shortener().len().await,
    })
}
