use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::dialogue::{LanguageCode, VoiceDemoService, VoiceListResponse},
    error::AppResult,
};

pub struct VoiceController {
    demo_service: Arc<VoiceDemoService>,
}

/// Unknown language codes fall back to the English voice list
fn resolve_language(code: &str) -> LanguageCode {
    LanguageCode::from_code(code).unwrap_or_else(|| {
        tracing::debug!(language = code, "Unknown language, using default voices");
        LanguageCode::English
    })
}

impl VoiceController {
    pub fn new(demo_service: Arc<VoiceDemoService>) -> Self {
        Self { demo_service }
    }

    /// GET /api/voices/:lang - Voice candidates for a language
    pub async fn list_voices(Path(lang): Path<String>) -> Json<VoiceListResponse> {
        Json(VoiceListResponse::for_language(resolve_language(&lang)))
    }

    /// GET /api/voices/:lang/:voice/demo - Short sample of a voice
    pub async fn demo(
        State(controller): State<Arc<VoiceController>>,
        Path((lang, voice)): Path<(String, String)>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let segment = controller
            .demo_service
            .demo(resolve_language(&lang), &voice)
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(segment.content_type()),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(segment.len()));

        Ok((StatusCode::OK, headers, Body::from(segment.data.to_vec())))
    }
}
