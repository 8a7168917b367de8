use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use super::error::ApiError;
use crate::AppState;
use crate::drive::{FileContent, FileDescriptor};

pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/files", get(list_files))
        .route("/file/{id}", get(get_file))
}

/// Health payload for monitoring.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// GET / - Service banner.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Google Drive gateway is running"
    }))
}

/// GET /health - Health check endpoint for monitoring.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "gdrive-gateway",
    })
}

/// GET /files - List all files in the configured Drive folder.
async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileDescriptor>>, ApiError> {
    let files = state.backend.list_files().await?;
    tracing::info!(count = files.len(), "Listed folder contents");
    Ok(Json(files))
}

/// GET /file/{id} - Fetch one file's content as normalized plain text.
async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FileContent>, ApiError> {
    let content = state.backend.get_file_content(&id).await?;
    tracing::info!(
        file_id = %content.id,
        name = %content.name,
        chars = content.text.len(),
        "Fetched file content"
    );
    Ok(Json(content))
}
