use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::domain::dialogue::SegmentFetcher;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(fetcher): State<Arc<SegmentFetcher>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "tts": fetcher.provider(),
            "cached_segments": fetcher.cache().entry_count().await
        })),
    )
}
