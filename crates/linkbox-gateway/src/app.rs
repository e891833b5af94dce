use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, delete_url_handler, expand_url_handler, health_handler, redirect_handler,
    stats_url_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/s/{code}", get(redirect_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/shorten", post(create_url_handler))
                    .route("/expand/{code}", get(expand_url_handler))
                    .route("/stats/{code}", get(stats_url_handler))
                    .route("/delete/{code}", delete(delete_url_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
