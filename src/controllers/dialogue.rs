use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    domain::dialogue::{
        DialogueAudioApi, DialogueAudioRequest, DialogueGenerationService,
        GenerateDialogueRequest, GeneratedDialogue, ProgressReporter, RenderedDialogue,
    },
    error::{AppError, AppResult},
    infrastructure::http::RequestId,
};

pub const X_SEGMENT_COUNT: &str = "x-segment-count";
pub const X_SEGMENTS_SKIPPED: &str = "x-segments-skipped";
pub const X_DURATION_SECONDS: &str = "x-duration-seconds";

/// Logs job progress under the id of the request that started it
struct RequestProgress {
    request_id: String,
}

impl ProgressReporter for RequestProgress {
    fn report(&self, completed: usize, total: usize) {
        tracing::info!(
            request_id = %self.request_id,
            completed,
            total,
            "Dialogue audio progress"
        );
    }
}

pub struct DialogueController {
    audio_service: Arc<dyn DialogueAudioApi>,
    generation_service: Arc<DialogueGenerationService>,
}

impl DialogueController {
    pub fn new(
        audio_service: Arc<dyn DialogueAudioApi>,
        generation_service: Arc<DialogueGenerationService>,
    ) -> Self {
        Self {
            audio_service,
            generation_service,
        }
    }

    /// POST /api/dialogue/generate - Write a dialogue for a language and level
    pub async fn generate(
        State(controller): State<Arc<DialogueController>>,
        Json(request): Json<GenerateDialogueRequest>,
    ) -> AppResult<Json<GeneratedDialogue>> {
        let dialogue = controller.generation_service.generate(&request).await?;
        Ok(Json(dialogue))
    }

    /// POST /api/dialogue/audio - Render a dialogue to one downloadable file
    pub async fn render_audio(
        State(controller): State<Arc<DialogueController>>,
        Extension(request_id): Extension<RequestId>,
        Json(request): Json<DialogueAudioRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let progress = RequestProgress {
            request_id: request_id.0,
        };

        let rendered = controller.audio_service.render(request, &progress).await?;
        let headers = download_headers(&rendered)?;

        Ok((StatusCode::OK, headers, Body::from(rendered.audio.data)))
    }
}

fn download_headers(rendered: &RenderedDialogue) -> AppResult<HeaderMap> {
    let audio = &rendered.audio;
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        rendered.filename,
        urlencoding::encode(&rendered.filename)
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(audio.content_type()),
    );
    headers.insert(header::CONTENT_DISPOSITION, header_value(&disposition)?);
    headers.insert(X_SEGMENT_COUNT, HeaderValue::from(audio.segments_used));
    headers.insert(X_SEGMENTS_SKIPPED, HeaderValue::from(audio.segments_skipped));
    if let Some(duration) = audio.duration_seconds {
        headers.insert(X_DURATION_SECONDS, header_value(&format!("{:.3}", duration))?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("Invalid header value: {}", e)))
}
