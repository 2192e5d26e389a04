use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // OpenAI
    pub openai_api_key: String,
    pub openai_project_id: Option<String>,
    pub openai_org_id: Option<String>,
    pub tts_model: String,
    pub tts_fallback_model: Option<String>,
    pub chat_model: String,
    // Dialogue audio defaults
    pub default_gap_seconds: f32,
    pub default_speed: f32,
    pub max_dialogue_turns: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Unset and blank variables both count as absent
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| "OPENAI_API_KEY must be set")?,
            openai_project_id: optional_var("OPENAI_PROJECT_ID"),
            openai_org_id: optional_var("OPENAI_ORG_ID"),
            tts_model: optional_var("OPENAI_TTS_MODEL")
                .unwrap_or_else(|| "gpt-4o-mini-tts".to_string()),
            // An explicitly blank value disables the fallback
            tts_fallback_model: match env::var("OPENAI_TTS_FALLBACK_MODEL") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => Some("tts-1".to_string()),
            },
            chat_model: optional_var("OPENAI_CHAT_MODEL")
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
            default_gap_seconds: env::var("DEFAULT_GAP_SECONDS")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()?,
            default_speed: env::var("DEFAULT_SPEED")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()?,
            max_dialogue_turns: env::var("MAX_DIALOGUE_TURNS")
                .unwrap_or_else(|_| "40".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
