#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("could not decode audio segment: {0}")]
    Decode(String),
    #[error("none of the {0} audio segments could be decoded")]
    NoDecodableAudio(usize),
    #[error("segment {index} is {found} but the first segment is {expected}")]
    IncompatibleSegments {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("no audio segments to assemble")]
    EmptyInput,
    #[error("assembled audio is too large for a WAV container ({0} bytes of samples)")]
    TooLarge(usize),
}
