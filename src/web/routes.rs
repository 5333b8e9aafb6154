use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::web::handlers::{lyrics, ping, search, translate};
use crate::web::types::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/search", get(search))
        .route("/lyrics", get(lyrics))
        .route("/translate", get(translate))
        // Browser extensions call from arbitrary origins
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
