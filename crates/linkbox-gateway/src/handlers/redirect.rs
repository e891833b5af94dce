use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use linkbox_core::StoreError;
use tracing::debug;
use url::Url;

/// Redirects a short link to its original URL, counting one click.
///
/// Unknown codes get the fallback page when one is configured.
pub async fn redirect_handler(Path(code): Path<String>, State(state): State<AppState>) -> Response {
    match state.shortener().resolve(&code).await {
        Ok(resolution) => {
            // the serialized form is plain ASCII, so it is always a valid header value
            let location = Url::parse(&resolution.original_url)
                .map(String::from)
                .unwrap_or(resolution.original_url);
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        Err(StoreError::NotFound(missing)) => match state.fallback_page() {
            Some(page) => {
                debug!(code = %missing, "short code not found, serving fallback page");
                Html(page.to_owned()).into_response()
            }
            None => AppError::from(StoreError::NotFound(missing)).into_response(),
        },
        Err(err) => AppError::from(err).into_response(),
    }
}
