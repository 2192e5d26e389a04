pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{dialogue::DialogueController, health, voices::VoiceController};
use crate::domain::dialogue::SegmentFetcher;
use crate::infrastructure::config::Config;

/// Build the application router with all routes and layers
pub fn create_router(
    fetcher: Arc<SegmentFetcher>,
    dialogue_controller: Arc<DialogueController>,
    voice_controller: Arc<VoiceController>,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(fetcher);

    let dialogue_routes = Router::new()
        .route("/api/dialogue/generate", post(DialogueController::generate))
        .route("/api/dialogue/audio", post(DialogueController::render_audio))
        .with_state(dialogue_controller);

    let voice_routes = Router::new()
        .route("/api/voices/:lang", get(VoiceController::list_voices))
        .route("/api/voices/:lang/:voice/demo", get(VoiceController::demo))
        .with_state(voice_controller);

    Router::new()
        .merge(health_routes)
        .merge(dialogue_routes)
        .merge(voice_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
