use crate::domain::dialogue::Speaker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::clamp_gap_seconds;

/// Output container chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Uncompressed 16-bit PCM WAV, assembled by decode + mix + encode
    Wav,
    /// MP3, assembled by splicing encoded frames
    #[default]
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Encoded audio for one utterance, exactly as the speech provider returned it.
///
/// The bytes are shared so that cached segments can be handed to several jobs
/// without copying.
#[derive(Debug, Clone)]
pub struct EncodedSegment {
    pub data: Arc<[u8]>,
    pub format: AudioFormat,
}

impl EncodedSegment {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            data: Arc::from(data),
            format,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Planar floating point samples at the segment's native rate
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSegment {
    pub sample_rate: u32,
    /// One sample vector per channel, all of equal length
    pub channels: Vec<Vec<f32>>,
}

impl DecodedSegment {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frames(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }
}

/// Which dialogue turn a segment belongs to. Bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRole {
    pub turn_index: usize,
    pub speaker: Speaker,
}

#[derive(Debug, Clone)]
pub struct JobSegment {
    pub segment: EncodedSegment,
    pub role: SegmentRole,
}

/// Ordered segments plus the silence to put between consecutive ones
#[derive(Debug, Clone)]
pub struct AssemblyJob {
    segments: Vec<JobSegment>,
    gap_seconds: f32,
}

impl AssemblyJob {
    pub fn new(gap_seconds: f32) -> Self {
        Self {
            segments: Vec::new(),
            gap_seconds: clamp_gap_seconds(gap_seconds),
        }
    }

    pub fn push(&mut self, segment: EncodedSegment, role: SegmentRole) {
        self.segments.push(JobSegment { segment, role });
    }

    pub fn segments(&self) -> &[JobSegment] {
        &self.segments
    }

    pub fn gap_seconds(&self) -> f32 {
        self.gap_seconds
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Final downloadable file
#[derive(Debug, Clone)]
pub struct AssembledAudio {
    pub data: Vec<u8>,
    pub format: AudioFormat,
    pub segments_used: usize,
    pub segments_skipped: usize,
    /// Exact duration, known only when the samples were mixed
    pub duration_seconds: Option<f32>,
}

impl AssembledAudio {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
