use super::error::DialogueAudioError;
use super::fetcher::SegmentFetcher;
use super::language::{normalize_voice, LanguageCode};
use super::model::{DialogueTurn, PlaybackSettings, ProficiencyLevel, Speaker};
use super::DialogueAudioRequest;
use crate::domain::audio::{
    assembler_for, clamp_gap_seconds, AssembledAudio, AssemblyJob, SegmentRole,
};
use crate::infrastructure::repositories::SegmentRequest;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};

pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;
pub const MAX_TURN_CHARS: usize = 4096;

/// Receives `(completed, total)` after every fetched turn
pub trait ProgressReporter: Send + Sync {
    fn report(&self, completed: usize, total: usize);
}

/// Reporter that only logs
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, completed: usize, total: usize) {
        tracing::debug!(completed, total, "Dialogue audio progress");
    }
}

/// Assembled file plus the name it should be downloaded under
#[derive(Debug, Clone)]
pub struct RenderedDialogue {
    pub audio: AssembledAudio,
    pub filename: String,
}

/// Effective parameters of one job after defaults and clamping
#[derive(Debug, Clone, PartialEq)]
struct ResolvedSettings {
    gap_seconds: f32,
    speed: f32,
    voice_a: &'static str,
    voice_b: &'static str,
}

impl ResolvedSettings {
    fn voice(&self, speaker: Speaker) -> &'static str {
        match speaker {
            Speaker::A => self.voice_a,
            Speaker::B => self.voice_b,
        }
    }
}

pub struct DialogueAudioService {
    fetcher: Arc<SegmentFetcher>,
    default_gap_seconds: f32,
    default_speed: f32,
    max_turns: usize,
}

impl DialogueAudioService {
    pub fn new(
        fetcher: Arc<SegmentFetcher>,
        default_gap_seconds: f32,
        default_speed: f32,
        max_turns: usize,
    ) -> Self {
        Self {
            fetcher,
            default_gap_seconds,
            default_speed,
            max_turns,
        }
    }
}

#[async_trait]
pub trait DialogueAudioApi: Send + Sync {
    /// Turn a dialogue into one downloadable audio file
    ///
    /// This operation:
    /// - Validates the turns and resolves voices, speed and gap
    /// - Fetches one segment per turn, strictly in order, reporting progress
    /// - Assembles WAV (decode + mix) or MP3 (splice) from the segments
    ///
    /// Any fetch failure aborts the job; no partial file is returned.
    async fn render(
        &self,
        request: DialogueAudioRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<RenderedDialogue, DialogueAudioError>;
}

#[async_trait]
impl DialogueAudioApi for DialogueAudioService {
    async fn render(
        &self,
        request: DialogueAudioRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<RenderedDialogue, DialogueAudioError> {
        let turns = self.validate_turns(&request.turns)?;
        let settings = self.resolve_settings(request.language, &request.settings)?;
        let format = request.settings.format;
        let total = turns.len();

        tracing::info!(
            language = %request.language,
            level = %request.level,
            format = %format,
            turn_count = total,
            gap_secs = settings.gap_seconds,
            speed = settings.speed,
            voice_a = settings.voice_a,
            voice_b = settings.voice_b,
            "Dialogue audio job started"
        );

        // 1. Fetch every segment in order, one at a time
        let mut job = AssemblyJob::new(settings.gap_seconds);
        for (turn_index, turn) in turns.into_iter().enumerate() {
            let segment_request = SegmentRequest {
                text: turn.text,
                voice: settings.voice(turn.speaker).to_string(),
                language: request.language,
                speed: settings.speed,
                format,
            };

            let segment = self
                .fetcher
                .fetch(&segment_request)
                .await
                .map_err(|source| {
                    tracing::error!(
                        turn_index,
                        total,
                        error = %source,
                        "Segment fetch failed, aborting job"
                    );
                    DialogueAudioError::Fetch {
                        turn: turn_index + 1,
                        total,
                        source,
                    }
                })?;

            job.push(
                segment,
                SegmentRole {
                    turn_index,
                    speaker: turn.speaker,
                },
            );
            progress.report(turn_index + 1, total);
        }

        // 2. Assemble off the async runtime
        let assembler = assembler_for(format);
        let audio = tokio::task::spawn_blocking(move || assembler.assemble(&job))
            .await
            .map_err(|e| anyhow::anyhow!("audio assembly task failed: {}", e))??;

        let filename = dialogue_filename(request.language, request.level, &audio);

        tracing::info!(
            filename = %filename,
            output_size = audio.data.len(),
            segments_used = audio.segments_used,
            segments_skipped = audio.segments_skipped,
            "Dialogue audio job finished"
        );

        Ok(RenderedDialogue { audio, filename })
    }
}

impl DialogueAudioService {
    /// Normalize whitespace and check turn count and lengths
    fn validate_turns(&self, turns: &[DialogueTurn]) -> Result<Vec<DialogueTurn>, DialogueAudioError> {
        if turns.is_empty() {
            return Err(DialogueAudioError::Invalid(
                "Dialogue must contain at least one turn".to_string(),
            ));
        }
        if turns.len() > self.max_turns {
            return Err(DialogueAudioError::Invalid(format!(
                "Dialogue has {} turns, at most {} are allowed",
                turns.len(),
                self.max_turns
            )));
        }

        turns
            .iter()
            .enumerate()
            .map(|(index, turn)| {
                let text = normalize_text(&turn.text);
                if text.is_empty() {
                    return Err(DialogueAudioError::Invalid(format!(
                        "Turn {} has no text",
                        index + 1
                    )));
                }
                if text.chars().count() > MAX_TURN_CHARS {
                    return Err(DialogueAudioError::TurnTooLong {
                        turn: index + 1,
                        max: MAX_TURN_CHARS,
                    });
                }
                Ok(DialogueTurn {
                    speaker: turn.speaker,
                    text,
                })
            })
            .collect()
    }

    fn resolve_settings(
        &self,
        language: LanguageCode,
        settings: &PlaybackSettings,
    ) -> Result<ResolvedSettings, DialogueAudioError> {
        let gap_seconds = clamp_gap_seconds(settings.gap_seconds.unwrap_or(self.default_gap_seconds));
        let speed = clamp_speed(settings.speed.unwrap_or(self.default_speed));

        let resolve_voice = |speaker: Speaker| -> Result<&'static str, DialogueAudioError> {
            match settings.voices.for_speaker(speaker) {
                Some(requested) => normalize_voice(requested).ok_or_else(|| {
                    DialogueAudioError::Invalid(format!(
                        "Unsupported voice '{}' for speaker {}",
                        requested, speaker
                    ))
                }),
                None => Ok(language.default_voice(speaker)),
            }
        };

        Ok(ResolvedSettings {
            gap_seconds,
            speed,
            voice_a: resolve_voice(Speaker::A)?,
            voice_b: resolve_voice(Speaker::B)?,
        })
    }
}

/// `dialogue_{lang}_{level}.{ext}`
pub fn dialogue_filename(
    language: LanguageCode,
    level: ProficiencyLevel,
    audio: &AssembledAudio,
) -> String {
    format!(
        "dialogue_{}_{}.{}",
        language.as_str(),
        level.as_str(),
        audio.format.extension()
    )
}

pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Collapse runs of whitespace and trim
pub fn normalize_text(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let pattern = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
    pattern.replace_all(text, " ").trim().to_string()
}
