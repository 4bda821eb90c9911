use crate::server::AppState;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

pub mod characters;
pub mod leaderboard;
pub mod portrait;
pub mod process;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/process-character", post(process::process_character))
        .route("/api/leaderboard", get(leaderboard::leaderboard))
        .route("/api/character-image/{id}", get(portrait::character_image))
        .route("/api/search-character", post(characters::search_character))
        .route("/api/lookup-character", post(characters::lookup_character))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
