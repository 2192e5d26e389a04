use crate::domain::audio::AudioError;
use crate::error::AppError;

/// Failure of the speech provider for one segment
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct SegmentFetchError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum DialogueAudioError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("turn {turn} exceeds {max} characters")]
    TurnTooLong { turn: usize, max: usize },
    #[error("speech synthesis failed for turn {turn} of {total}: {source}")]
    Fetch {
        turn: usize,
        total: usize,
        #[source]
        source: SegmentFetchError,
    },
    #[error("speech synthesis failed: {0}")]
    Dependency(#[from] SegmentFetchError),
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DialogueAudioError> for AppError {
    fn from(err: DialogueAudioError) -> Self {
        match err {
            DialogueAudioError::Invalid(msg) => AppError::BadRequest(msg),
            DialogueAudioError::TurnTooLong { .. } => AppError::PayloadTooLarge(err.to_string()),
            DialogueAudioError::Fetch { .. } | DialogueAudioError::Dependency(_) => {
                AppError::ExternalService(err.to_string())
            }
            DialogueAudioError::Audio(
                AudioError::NoDecodableAudio(_) | AudioError::IncompatibleSegments { .. },
            ) => AppError::Unprocessable(err.to_string()),
            DialogueAudioError::Audio(e) => AppError::Internal(e.to_string()),
            DialogueAudioError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DialogueGenerationError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("model returned an unusable dialogue: {0}")]
    MalformedResponse(String),
}

impl From<DialogueGenerationError> for AppError {
    fn from(err: DialogueGenerationError) -> Self {
        match err {
            DialogueGenerationError::Invalid(msg) => AppError::BadRequest(msg),
            DialogueGenerationError::Dependency(_) | DialogueGenerationError::MalformedResponse(_) => {
                AppError::ExternalService(err.to_string())
            }
        }
    }
}
