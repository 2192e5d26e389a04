use super::decoder::decode_segment;
use super::error::AudioError;
use super::mixer::mix_with_gaps;
use super::mp3_splice::splice_mp3;
use super::segment::{AssembledAudio, AssemblyJob, AudioFormat};
use super::wav::encode_wav;

/// Turns an ordered job into one downloadable file.
///
/// Implementations are CPU bound and synchronous; callers on an async runtime
/// should run them on a blocking thread.
pub trait AudioAssembler: Send + Sync {
    /// Container this assembler produces
    fn format(&self) -> AudioFormat;

    fn assemble(&self, job: &AssemblyJob) -> Result<AssembledAudio, AudioError>;
}

/// Pick the assembler for an output format
pub fn assembler_for(format: AudioFormat) -> Box<dyn AudioAssembler> {
    match format {
        AudioFormat::Wav => Box::new(WavAssembler),
        AudioFormat::Mp3 => Box::new(Mp3SpliceAssembler),
    }
}

/// Decode every segment, mix with exact gaps, encode as 16-bit WAV.
/// Segments that fail to decode are dropped as long as one survives.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavAssembler;

impl AudioAssembler for WavAssembler {
    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn assemble(&self, job: &AssemblyJob) -> Result<AssembledAudio, AudioError> {
        if job.is_empty() {
            return Err(AudioError::EmptyInput);
        }

        let mut decoded = Vec::with_capacity(job.len());
        let mut skipped = 0;

        for entry in job.segments() {
            match decode_segment(&entry.segment) {
                Ok(segment) => decoded.push(segment),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        error = %e,
                        turn_index = entry.role.turn_index,
                        speaker = %entry.role.speaker,
                        segment_size = entry.segment.len(),
                        "Skipping segment that could not be decoded"
                    );
                }
            }
        }

        if decoded.is_empty() {
            return Err(AudioError::NoDecodableAudio(job.len()));
        }

        let mixed = mix_with_gaps(&decoded, job.gap_seconds())?;
        let data = encode_wav(&mixed.samples, mixed.sample_rate, mixed.channels)?;

        tracing::info!(
            segments_used = decoded.len(),
            segments_skipped = skipped,
            sample_rate = mixed.sample_rate,
            channels = mixed.channels,
            duration_secs = mixed.duration_seconds(),
            output_size = data.len(),
            "WAV assembled"
        );

        Ok(AssembledAudio {
            data,
            format: AudioFormat::Wav,
            segments_used: decoded.len(),
            segments_skipped: skipped,
            duration_seconds: Some(mixed.duration_seconds()),
        })
    }
}

/// Splice encoded MP3 clips without re-encoding. The requested gap is not
/// honoured exactly.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mp3SpliceAssembler;

impl AudioAssembler for Mp3SpliceAssembler {
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn assemble(&self, job: &AssemblyJob) -> Result<AssembledAudio, AudioError> {
        if job.is_empty() {
            return Err(AudioError::EmptyInput);
        }

        let clips: Vec<&[u8]> = job
            .segments()
            .iter()
            .map(|entry| entry.segment.data.as_ref())
            .collect();
        let data = splice_mp3(&clips);

        tracing::info!(
            segments_used = clips.len(),
            requested_gap_secs = job.gap_seconds(),
            output_size = data.len(),
            "MP3 assembled"
        );

        Ok(AssembledAudio {
            data,
            format: AudioFormat::Mp3,
            segments_used: clips.len(),
            segments_skipped: 0,
            duration_seconds: None,
        })
    }
}
