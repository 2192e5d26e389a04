use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use dialogue_audio::controllers::{dialogue::DialogueController, voices::VoiceController};
use dialogue_audio::domain::dialogue::{
    DialogueAudioService, DialogueGenerationService, SegmentFetcher, VoiceDemoService,
};
use dialogue_audio::infrastructure::cache::SegmentCache;
use dialogue_audio::infrastructure::config::{Config, LogFormat};
use dialogue_audio::infrastructure::http::{create_router, start_http_server};
use dialogue_audio::infrastructure::repositories::{
    OpenAiDialogueRepository, OpenAiSpeechRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting dialogue audio service on {}:{}",
        config.host,
        config.port
    );

    // Create OpenAI client
    let mut openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    if let Some(project_id) = &config.openai_project_id {
        openai_config = openai_config.with_project_id(project_id.clone());
    }
    if let Some(org_id) = &config.openai_org_id {
        openai_config = openai_config.with_org_id(org_id.clone());
    }
    let openai_client = Arc::new(Client::with_config(openai_config));
    tracing::info!(
        tts_model = %config.tts_model,
        tts_fallback_model = ?config.tts_fallback_model,
        chat_model = %config.chat_model,
        has_project_id = config.openai_project_id.is_some(),
        "OpenAI client initialized"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject OpenAI client)
    tracing::info!("Instantiating repositories...");
    let speech_repo = Arc::new(OpenAiSpeechRepository::new(
        openai_client.clone(),
        config.tts_model.clone(),
        config.tts_fallback_model.clone(),
    ));
    let dialogue_repo = Arc::new(OpenAiDialogueRepository::new(
        openai_client,
        config.chat_model.clone(),
    ));

    // 2. Shared segment cache and fetcher
    let fetcher = Arc::new(SegmentFetcher::new(
        speech_repo,
        Arc::new(SegmentCache::new()),
    ));

    // 3. Instantiate services
    tracing::info!("Instantiating services...");
    let audio_service = Arc::new(DialogueAudioService::new(
        fetcher.clone(),
        config.default_gap_seconds,
        config.default_speed,
        config.max_dialogue_turns,
    ));
    let generation_service = Arc::new(DialogueGenerationService::new(dialogue_repo));
    let demo_service = Arc::new(VoiceDemoService::new(fetcher.clone()));

    // 4. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let dialogue_controller = Arc::new(DialogueController::new(audio_service, generation_service));
    let voice_controller = Arc::new(VoiceController::new(demo_service));

    // Start HTTP server with all routes
    let app = create_router(fetcher, dialogue_controller, voice_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "dialogue_audio=debug,tower_http=debug"
    } else {
        "dialogue_audio=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
