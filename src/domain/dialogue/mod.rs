pub mod demo;
pub mod error;
pub mod fetcher;
pub mod generation;
pub mod language;
pub mod model;
pub mod service;

pub use demo::VoiceDemoService;
pub use error::{DialogueAudioError, DialogueGenerationError, SegmentFetchError};
pub use fetcher::SegmentFetcher;
pub use generation::DialogueGenerationService;
pub use language::{normalize_voice, LanguageCode, SUPPORTED_VOICES};
pub use model::{DialogueTurn, PlaybackSettings, ProficiencyLevel, Speaker, SpeakerVoices};
use serde::{Deserialize, Serialize};
pub use service::{
    DialogueAudioApi, DialogueAudioService, LogProgress, ProgressReporter, RenderedDialogue,
};

/// Request for POST /api/dialogue/audio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueAudioRequest {
    pub language: LanguageCode,
    pub level: ProficiencyLevel,
    pub turns: Vec<DialogueTurn>,
    #[serde(default)]
    pub settings: PlaybackSettings,
}

/// Request for POST /api/dialogue/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDialogueRequest {
    pub language: LanguageCode,
    pub level: ProficiencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turns: Option<usize>,
}

/// Response for POST /api/dialogue/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDialogue {
    pub language: LanguageCode,
    pub level: ProficiencyLevel,
    pub title: String,
    pub turns: Vec<DialogueTurn>,
}

/// Response for GET /api/voices/:lang
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceListResponse {
    pub language: LanguageCode,
    pub voices: Vec<String>,
    pub default_a: String,
    pub default_b: String,
}

impl VoiceListResponse {
    pub fn for_language(language: LanguageCode) -> Self {
        Self {
            language,
            voices: language
                .voice_candidates()
                .iter()
                .map(|v| v.to_string())
                .collect(),
            default_a: language.default_voice(Speaker::A).to_string(),
            default_b: language.default_voice(Speaker::B).to_string(),
        }
    }
}
