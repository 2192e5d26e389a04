use crate::domain::audio::AudioFormat;
use crate::domain::dialogue::LanguageCode;
use async_trait::async_trait;

/// Everything the provider needs to voice one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRequest {
    pub text: String,
    pub voice: String,
    pub language: LanguageCode,
    pub speed: f32,
    pub format: AudioFormat,
}

/// Repository for speech synthesis.
/// Abstracts the underlying TTS provider (OpenAI today).
///
/// Implementations synthesize exactly one utterance per call; splitting,
/// caching and stitching happen above this layer.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize one utterance
    ///
    /// Returns the encoded audio in `request.format`
    ///
    /// # Errors
    /// Returns a message if the provider rejects the request or is unavailable
    async fn synthesize(&self, request: &SegmentRequest) -> Result<Vec<u8>, String>;

    /// Provider name for logs and readiness checks
    fn provider(&self) -> &'static str;
}
