use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use feeder_core::model::ProcessOutcome;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub character_id: i64,
    pub character_name: String,
}

pub async fn process_character(
    State(state): State<AppState>,
    body: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessOutcome>, ApiError> {
    let Json(req) = body?;
    if req.character_id <= 0 {
        return Err(ApiError::InvalidInput(format!(
            "characterId must be a positive integer, got {}",
            req.character_id
        )));
    }

    let outcome = state
        .processor
        .process(req.character_id, &req.character_name)
        .await
        .map_err(|e| ApiError::internal("Failed to process character", e))?;
    Ok(Json(outcome))
}
