use super::error::DialogueAudioError;
use super::fetcher::SegmentFetcher;
use super::language::{normalize_voice, LanguageCode};
use crate::domain::audio::{AudioFormat, EncodedSegment};
use crate::infrastructure::repositories::SegmentRequest;
use std::sync::Arc;

pub const DEMO_SPEED: f32 = 0.95;

/// Short MP3 samples of each voice, served through the shared segment cache
pub struct VoiceDemoService {
    fetcher: Arc<SegmentFetcher>,
}

impl VoiceDemoService {
    pub fn new(fetcher: Arc<SegmentFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn demo(
        &self,
        language: LanguageCode,
        voice: &str,
    ) -> Result<EncodedSegment, DialogueAudioError> {
        let voice = normalize_voice(voice).ok_or_else(|| {
            DialogueAudioError::Invalid(format!("Unsupported voice '{}'", voice))
        })?;

        let request = SegmentRequest {
            text: language.demo_sentence().to_string(),
            voice: voice.to_string(),
            language,
            speed: DEMO_SPEED,
            format: AudioFormat::Mp3,
        };

        tracing::info!(language = %language, voice, "Serving voice demo");

        Ok(self.fetcher.fetch(&request).await?)
    }
}
