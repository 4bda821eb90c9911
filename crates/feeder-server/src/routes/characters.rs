use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub character_id: i64,
}

pub async fn search_character(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = body?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput("name cannot be empty".into()));
    }
    let found = state
        .directory
        .search(name)
        .await
        .map_err(|e| ApiError::internal("Failed to search character", e))?;
    Ok(Json(found))
}

pub async fn lookup_character(
    State(state): State<AppState>,
    body: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = body?;
    let found = state
        .directory
        .lookup(req.character_id)
        .await
        .map_err(|e| ApiError::internal("Failed to lookup character", e))?;
    Ok(Json(found))
}
