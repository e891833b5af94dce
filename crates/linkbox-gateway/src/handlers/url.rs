use crate::error::Result;
use crate::model::{ApiResponse, CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use linkbox_core::{LinkRecord, Resolution};

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CreateUrlResponse>>> {
    let Json(request) = payload?;
    let url = request.url.unwrap_or_default();

    let link = state.shortener().shorten(&url).await?;
    Ok(Json(ApiResponse::ok(link.into())))
}

pub async fn expand_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Resolution>>> {
    let resolution = state.shortener().resolve(&code).await?;
    Ok(Json(ApiResponse::ok(resolution)))
}

pub async fn stats_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LinkRecord>>> {
    let record = state.shortener().stats(&code).await?;
    Ok(Json(ApiResponse::ok(record)))
}

pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LinkRecord>>> {
    let record = state.shortener().remove(&code).await?;
    Ok(Json(ApiResponse::ok(record)))
}
