use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use feeder_core::model::AggregateResult;

pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<AggregateResult>>, ApiError> {
    let rows = state
        .store
        .leaderboard(state.leaderboard_limit)
        .map_err(|e| ApiError::internal("Failed to get leaderboard", e))?;
    Ok(Json(rows))
}
