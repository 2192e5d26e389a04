use super::model::Speaker;
use serde::{Deserialize, Serialize};

/// ISO 639-1 codes of the languages dialogues can be generated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "nl")]
    Dutch,
}

/// Voices the speech provider accepts
pub const SUPPORTED_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

impl LanguageCode {
    pub const ALL: [LanguageCode; 9] = [
        LanguageCode::English,
        LanguageCode::French,
        LanguageCode::German,
        LanguageCode::Italian,
        LanguageCode::Spanish,
        LanguageCode::Russian,
        LanguageCode::Japanese,
        LanguageCode::Portuguese,
        LanguageCode::Dutch,
    ];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Spanish => "es",
            LanguageCode::Russian => "ru",
            LanguageCode::Japanese => "ja",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Dutch => "nl",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.as_str() == code)
    }

    /// English name, used in prompts
    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::French => "French",
            LanguageCode::German => "German",
            LanguageCode::Italian => "Italian",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::Russian => "Russian",
            LanguageCode::Japanese => "Japanese",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Dutch => "Dutch",
        }
    }

    /// Ordered voice candidates; the first two voice speakers A and B
    pub fn voice_candidates(&self) -> &'static [&'static str] {
        match self {
            LanguageCode::English => &["alloy", "echo", "nova", "shimmer"],
            LanguageCode::French => &["nova", "shimmer", "alloy", "echo"],
            LanguageCode::German => &["onyx", "shimmer", "alloy", "echo"],
            LanguageCode::Italian => &["nova", "fable", "alloy"],
            LanguageCode::Spanish => &["alloy", "nova", "fable"],
            LanguageCode::Russian => &["alloy", "echo", "nova"],
            LanguageCode::Japanese => &["nova", "alloy", "echo"],
            LanguageCode::Portuguese => &["alloy", "nova", "echo"],
            LanguageCode::Dutch => &["alloy", "echo", "shimmer"],
        }
    }

    /// Default voice for a speaker when the user picked none
    pub fn default_voice(&self, speaker: Speaker) -> &'static str {
        let candidates = self.voice_candidates();
        match speaker {
            Speaker::A => candidates[0],
            Speaker::B => candidates.get(1).copied().unwrap_or(candidates[0]),
        }
    }

    /// Localized "do you want to learn X with me?" sentence for voice demos
    pub fn demo_sentence(&self) -> &'static str {
        match self {
            LanguageCode::English => "Hello, do you want to learn English with me? Let's go!",
            LanguageCode::French => "Bonjour, tu veux apprendre le français avec moi ? Allons-y !",
            LanguageCode::German => "Hallo, willst du Deutsch mit mir lernen? Los geht's!",
            LanguageCode::Italian => "Ciao, vuoi imparare l'italiano con me? Andiamo!",
            LanguageCode::Spanish => "Hola, ¿quieres aprender español conmigo? ¡Vamos!",
            LanguageCode::Russian => "Привет, хочешь выучить русский со мной? Поехали!",
            LanguageCode::Japanese => "こんにちは、一緒に日本語を学びませんか？さあ行こう！",
            LanguageCode::Portuguese => "Olá, quer aprender português comigo? Vamos lá!",
            LanguageCode::Dutch => "Hallo, wil je samen Nederlands leren? Laten we gaan!",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize a voice name and check the provider supports it
pub fn normalize_voice(voice: &str) -> Option<&'static str> {
    let voice = voice.trim().to_ascii_lowercase();
    SUPPORTED_VOICES.iter().copied().find(|v| *v == voice)
}
