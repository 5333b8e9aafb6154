use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, warn};

use crate::core::orchestrator::{SongLyrics, TextTranslation};
use crate::error::BridgeError;
use crate::web::types::{AppState, PingResponse, SearchResponse, SongQuery, TextQuery};

type ApiError = (StatusCode, Json<Value>);

fn error_response(err: BridgeError) -> ApiError {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Rejected request: {}", err);
    }
    (status, Json(json!({ "error": err.to_string() })))
}

pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let availability = state.orchestrator.availability();
    Json(PingResponse {
        status: "ok",
        lyrics_provider: availability.lyrics_provider,
        translation_provider: availability.translation_provider,
    })
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SongQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state
        .orchestrator
        .search_tracks(
            query.artist.as_deref().unwrap_or_default(),
            query.title.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(error_response)?;

    Ok(Json(SearchResponse { results }))
}

pub async fn lyrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SongQuery>,
) -> Result<Json<SongLyrics>, ApiError> {
    let result = state
        .orchestrator
        .fetch_song(
            query.artist.as_deref().unwrap_or_default(),
            query.title.as_deref().unwrap_or_default(),
            query.lang.as_deref(),
        )
        .await
        .map_err(error_response)?;

    Ok(Json(result))
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TextQuery>,
) -> Result<Json<TextTranslation>, ApiError> {
    let result = state
        .orchestrator
        .translate_text(query.text.as_deref().unwrap_or_default(), query.lang.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(result))
}
