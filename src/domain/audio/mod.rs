pub mod assembler;
pub mod decoder;
pub mod error;
pub mod mixer;
pub mod mp3_splice;
pub mod segment;
pub mod wav;

pub use assembler::{assembler_for, AudioAssembler, Mp3SpliceAssembler, WavAssembler};
pub use error::AudioError;
pub use segment::{
    AssembledAudio, AssemblyJob, AudioFormat, DecodedSegment, EncodedSegment, JobSegment,
    SegmentRole,
};

/// Silence inserted between turns when the caller does not ask for a gap
pub const DEFAULT_GAP_SECONDS: f32 = 0.5;

/// Upper bound for the inter-turn silence
pub const MAX_GAP_SECONDS: f32 = 3.0;

/// Clamp a requested gap into `0.0..=MAX_GAP_SECONDS`. NaN becomes zero.
pub fn clamp_gap_seconds(gap_seconds: f32) -> f32 {
    if gap_seconds.is_nan() {
        return 0.0;
    }
    gap_seconds.clamp(0.0, MAX_GAP_SECONDS)
}
