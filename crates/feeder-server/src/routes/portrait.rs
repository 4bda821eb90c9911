use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use feeder_core::errors::PortraitError;

/// Seven days, matching the portrait freshness window.
pub const PORTRAIT_CACHE_CONTROL: &str = "public, max-age=604800";

pub fn parse_character_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidInput(format!(
            "character id must be a positive integer, got {raw:?}"
        ))),
    }
}

pub async fn character_image(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let character_id = parse_character_id(&raw_id)?;

    let portrait = match state.portraits.get_or_refresh(character_id).await {
        Ok(p) => p,
        Err(PortraitError::Unavailable { .. }) => return Err(ApiError::PortraitUnavailable),
        Err(e) => return Err(ApiError::internal("Failed to fetch character portrait", e)),
    };

    let etag = portrait.etag();
    let cache_control = HeaderValue::from_static(PORTRAIT_CACHE_CONTROL);
    let etag_value = HeaderValue::from_str(&etag)
        .map_err(|e| ApiError::internal("Failed to fetch character portrait", e))?;

    let not_modified = headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|t| t.trim() == etag));
    if not_modified {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [(CACHE_CONTROL, cache_control), (ETAG, etag_value)],
        )
            .into_response());
    }

    let content_type = HeaderValue::from_str(&portrait.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, cache_control),
            (ETAG, etag_value),
        ],
        portrait.bytes,
    )
        .into_response())
}
