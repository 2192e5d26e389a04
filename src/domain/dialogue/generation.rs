use super::error::DialogueGenerationError;
use super::model::DialogueTurn;
use super::service::normalize_text;
use super::{GenerateDialogueRequest, GeneratedDialogue};
use crate::infrastructure::repositories::DialogueRepository;
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, OnceLock};

pub const DEFAULT_TURNS: usize = 8;
pub const MIN_TURNS: usize = 2;
pub const MAX_TURNS: usize = 20;
pub const MAX_TOPIC_CHARS: usize = 200;
const DEFAULT_TOPIC: &str = "everyday life";

const SYSTEM_PROMPT: &str = "You write short dialogues for language learners. \
Always answer with a single JSON object of the form \
{\"title\": string, \"turns\": [{\"speaker\": \"A\" | \"B\", \"text\": string}]} \
and nothing else.";

/// Raw shape the model is asked to produce
#[derive(Debug, Deserialize)]
struct RawDialogue {
    #[serde(default)]
    title: String,
    turns: Vec<DialogueTurn>,
}

pub struct DialogueGenerationService {
    repository: Arc<dyn DialogueRepository>,
}

impl DialogueGenerationService {
    pub fn new(repository: Arc<dyn DialogueRepository>) -> Self {
        Self { repository }
    }

    pub async fn generate(
        &self,
        request: &GenerateDialogueRequest,
    ) -> Result<GeneratedDialogue, DialogueGenerationError> {
        let topic = match request.topic.as_deref().map(normalize_text) {
            Some(topic) if topic.chars().count() > MAX_TOPIC_CHARS => {
                return Err(DialogueGenerationError::Invalid(format!(
                    "Topic exceeds {} characters",
                    MAX_TOPIC_CHARS
                )));
            }
            Some(topic) if !topic.is_empty() => topic,
            _ => DEFAULT_TOPIC.to_string(),
        };
        let turn_count = request.turns.unwrap_or(DEFAULT_TURNS).clamp(MIN_TURNS, MAX_TURNS);

        let user_prompt = render_prompt(request, &topic, turn_count);

        tracing::info!(
            language = %request.language,
            level = %request.level,
            topic = %topic,
            turn_count,
            "Generating dialogue"
        );

        let raw = self
            .repository
            .complete_json(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(DialogueGenerationError::Dependency)?;

        let dialogue = parse_dialogue(&raw)?;

        tracing::info!(
            title = %dialogue.title,
            turns = dialogue.turns.len(),
            "Dialogue generated"
        );

        Ok(GeneratedDialogue {
            language: request.language,
            level: request.level,
            title: dialogue.title,
            turns: dialogue.turns,
        })
    }
}

fn render_prompt(request: &GenerateDialogueRequest, topic: &str, turn_count: usize) -> String {
    format!(
        "Write a dialogue in {language} between two speakers, A and B, about {topic}.\n\
         Target CEFR level {level} ({description}).\n\
         Write exactly {turn_count} turns, starting with speaker A.\n\
         Use only {language} in the turns. Give the dialogue a short title in {language}.",
        language = request.language.name(),
        topic = topic,
        level = request.level,
        description = request.level.description(),
        turn_count = turn_count,
    )
}

/// Strip an optional ``` fence and validate the model output
fn parse_dialogue(raw: &str) -> Result<RawDialogue, DialogueGenerationError> {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid fence pattern")
    });
    let body = fence
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw);

    let mut dialogue: RawDialogue = serde_json::from_str(body)
        .map_err(|e| DialogueGenerationError::MalformedResponse(e.to_string()))?;

    dialogue.title = normalize_text(&dialogue.title);
    for turn in dialogue.turns.iter_mut() {
        turn.text = normalize_text(&turn.text);
    }
    dialogue.turns.retain(|turn| !turn.text.is_empty());

    if dialogue.turns.len() < MIN_TURNS {
        return Err(DialogueGenerationError::MalformedResponse(format!(
            "expected at least {} non-empty turns, got {}",
            MIN_TURNS,
            dialogue.turns.len()
        )));
    }

    Ok(dialogue)
}
