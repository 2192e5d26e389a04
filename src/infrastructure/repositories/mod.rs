pub mod dialogue_repository;
pub mod openai_dialogue_repository;
pub mod openai_speech_repository;
pub mod speech_repository;

pub use dialogue_repository::DialogueRepository;
pub use openai_dialogue_repository::OpenAiDialogueRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use speech_repository::{SegmentRequest, SpeechRepository};
