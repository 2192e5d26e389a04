use super::error::AudioError;
use super::segment::DecodedSegment;

/// Interleaved PCM for a whole dialogue
#[derive(Debug, Clone, PartialEq)]
pub struct MixedPcm {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl MixedPcm {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }
}

/// Number of silent frames for a gap at the given rate
pub fn gap_frames(sample_rate: u32, gap_seconds: f32) -> usize {
    let gap_seconds = if gap_seconds.is_nan() {
        0.0
    } else {
        gap_seconds.max(0.0)
    };
    (sample_rate as f64 * gap_seconds as f64).round() as usize
}

/// Lay segments end to end with `gap_seconds` of silence between neighbours.
///
/// The first segment fixes the sample rate and channel count; any segment
/// that disagrees is rejected rather than resampled.
pub fn mix_with_gaps(
    segments: &[DecodedSegment],
    gap_seconds: f32,
) -> Result<MixedPcm, AudioError> {
    let first = segments.first().ok_or(AudioError::EmptyInput)?;
    let sample_rate = first.sample_rate;
    let channels = first.channel_count();

    if channels == 0 || channels > u16::MAX as usize {
        return Err(AudioError::Decode(format!(
            "unsupported channel count {}",
            channels
        )));
    }

    for (index, segment) in segments.iter().enumerate().skip(1) {
        if segment.sample_rate != sample_rate || segment.channel_count() != channels {
            return Err(AudioError::IncompatibleSegments {
                index,
                expected: describe(sample_rate, channels),
                found: describe(segment.sample_rate, segment.channel_count()),
            });
        }
    }

    let gap = gap_frames(sample_rate, gap_seconds);
    let total_frames: usize = segments.iter().map(DecodedSegment::frames).sum::<usize>()
        + gap * (segments.len() - 1);

    tracing::debug!(
        sample_rate,
        channels,
        segment_count = segments.len(),
        gap_frames = gap,
        total_frames,
        "Mixing segments"
    );

    let mut samples = vec![0.0_f32; total_frames * channels];
    let mut cursor = 0;
    let last = segments.len() - 1;

    for (index, segment) in segments.iter().enumerate() {
        let frames = segment.frames();
        for (channel, data) in segment.channels.iter().enumerate() {
            for (frame, sample) in data.iter().take(frames).enumerate() {
                samples[(cursor + frame) * channels + channel] = *sample;
            }
        }
        cursor += frames;
        // the buffer is already zeroed, skipping the cursor is the silence
        if index < last {
            cursor += gap;
        }
    }

    Ok(MixedPcm {
        samples,
        sample_rate,
        channels: channels as u16,
    })
}

fn describe(sample_rate: u32, channels: usize) -> String {
    format!("{} Hz / {} ch", sample_rate, channels)
}
