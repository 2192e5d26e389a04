use super::speech_repository::{SegmentRequest, SpeechRepository};
use crate::domain::audio::AudioFormat;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI TTS implementation of the speech repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    fallback_model: Option<String>,
}

impl OpenAiSpeechRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        model: String,
        fallback_model: Option<String>,
    ) -> Self {
        Self {
            client,
            model,
            fallback_model,
        }
    }

    fn speech_model(name: &str) -> SpeechModel {
        match name {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn voice(name: &str) -> Voice {
        match name.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            other => {
                tracing::warn!(voice = other, "Unknown voice, using alloy");
                Voice::Alloy
            }
        }
    }

    fn response_format(format: AudioFormat) -> SpeechResponseFormat {
        match format {
            AudioFormat::Wav => SpeechResponseFormat::Wav,
            AudioFormat::Mp3 => SpeechResponseFormat::Mp3,
        }
    }

    /// Errors worth retrying on another model
    fn is_model_error(message: &str) -> bool {
        let message = message.to_lowercase();
        ["model", "not found", "unsupported"]
            .iter()
            .any(|token| message.contains(token))
    }

    /// Call OpenAI TTS API for a single utterance with the given model
    async fn call_openai(&self, model: &str, request: &SegmentRequest) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = model,
            voice = %request.voice,
            language = %request.language,
            format = %request.format,
            speed = request.speed,
            text_length = request.text.len(),
            "Calling OpenAI TTS API"
        );

        let speech_request = CreateSpeechRequest {
            model: Self::speech_model(model),
            input: request.text.clone(),
            voice: Self::voice(&request.voice),
            response_format: Some(Self::response_format(request.format)),
            speed: Some(request.speed),
        };

        let response = self
            .client
            .audio()
            .speech(speech_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = model,
                    voice = %request.voice,
                    text_length = request.text.len(),
                    "OpenAI TTS API call failed"
                );
                format!("OpenAI TTS error: {}", e)
            })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(&self, request: &SegmentRequest) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let result = match self.call_openai(&self.model, request).await {
            Err(message) if Self::is_model_error(&message) => match &self.fallback_model {
                Some(fallback) if fallback != &self.model => {
                    tracing::warn!(
                        primary_model = %self.model,
                        fallback_model = %fallback,
                        error = %message,
                        "Primary TTS model rejected, retrying with fallback"
                    );
                    self.call_openai(fallback, request).await
                }
                _ => Err(message),
            },
            other => other,
        };

        let audio_data = result?;

        tracing::info!(
            provider = "openai",
            voice = %request.voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = request.text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    fn provider(&self) -> &'static str {
        "openai"
    }
}
