use async_trait::async_trait;
use dialogue_audio::domain::audio::AudioFormat;
use dialogue_audio::infrastructure::repositories::{
    DialogueRepository, SegmentRequest, SpeechRepository,
};
use std::io::Cursor;
use std::sync::Mutex;

pub const FAKE_SAMPLE_RATE: u32 = 24000;
/// 0.1 s per synthesized utterance
pub const FAKE_SEGMENT_FRAMES: usize = 2400;
pub const FAKE_SAMPLE: i16 = 8000;

/// Marker texts that make the fake provider misbehave
pub const FAIL_MARKER: &str = "[fail]";
pub const CORRUPT_MARKER: &str = "[corrupt]";

/// In-memory speech provider.
///
/// WAV requests get a constant-amplitude mono clip; MP3 requests get a few
/// frame-like bytes wrapped in ID3v2 and ID3v1 tags.
#[derive(Default)]
pub struct FakeSpeech {
    requests: Mutex<Vec<SegmentRequest>>,
}

impl FakeSpeech {
    pub fn requests(&self) -> Vec<SegmentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechRepository for FakeSpeech {
    async fn synthesize(&self, request: &SegmentRequest) -> Result<Vec<u8>, String> {
        self.requests.lock().unwrap().push(request.clone());

        if request.text.contains(FAIL_MARKER) {
            return Err("fake provider: HTTP 500".to_string());
        }
        if request.text.contains(CORRUPT_MARKER) {
            return Ok(b"definitely not audio".repeat(8));
        }

        match request.format {
            AudioFormat::Wav => Ok(wav_clip(FAKE_SEGMENT_FRAMES, FAKE_SAMPLE)),
            AudioFormat::Mp3 => Ok(tagged_mp3_clip()),
        }
    }

    fn provider(&self) -> &'static str {
        "fake"
    }
}

pub fn wav_clip(frames: usize, sample: i16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: FAKE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    bytes
}

/// Four fake frame bytes between a 10-byte ID3v2 tag (empty body) and a
/// 128-byte ID3v1 tag.
pub fn tagged_mp3_clip() -> Vec<u8> {
    let mut bytes = vec![b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 0];
    bytes.extend_from_slice(&[0xFF, 0xF3, 0x44, 0xC4]);
    let mut id3v1 = vec![0u8; 128];
    id3v1[..3].copy_from_slice(b"TAG");
    bytes.extend_from_slice(&id3v1);
    bytes
}

/// Chat model stand-in returning a fixed dialogue
#[derive(Default)]
pub struct FakeDialogueModel {
    prompts: Mutex<Vec<String>>,
}

impl FakeDialogueModel {
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DialogueRepository for FakeDialogueModel {
    async fn complete_json(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, String> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());

        if user_prompt.contains("[down]") {
            return Err("fake model: connection reset".to_string());
        }
        if user_prompt.contains("[broken]") {
            return Ok("Sure! Here is your dialogue:".to_string());
        }

        Ok(r#"{
            "title": "Au marché",
            "turns": [
                {"speaker": "A", "text": "Bonjour, je voudrais des pommes."},
                {"speaker": "B", "text": "Combien en voulez-vous ?"},
                {"speaker": "A", "text": "Un kilo, s'il vous plaît."}
            ]
        }"#
        .to_string())
    }
}
