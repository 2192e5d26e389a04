//! Best-effort MP3 concatenation.
//!
//! MP3 frames are self-delimiting, so independently encoded clips can be
//! joined byte-wise once their ID3 tags are removed. Gap length is
//! approximate: a fixed block of encoded silence goes between clips whatever
//! gap was requested.

const ID3V2_MAGIC: &[u8; 3] = b"ID3";
const ID3V2_HEADER_LEN: usize = 10;
const ID3V2_FOOTER_FLAG: u8 = 0x10;

const ID3V1_MAGIC: &[u8; 3] = b"TAG";
const ID3V1_LEN: usize = 128;

/// MPEG-2 Layer III, 32 kbps, 24 kHz, mono, no CRC
const SILENT_FRAME_HEADER: [u8; 4] = [0xFF, 0xF3, 0x44, 0xC4];
/// 72 * 32000 / 24000
const SILENT_FRAME_LEN: usize = 96;
/// 42 frames of 576 samples at 24 kHz is just over one second
const SILENT_FRAME_COUNT: usize = 42;
pub const SILENT_FRAME_SAMPLES: usize = 576;
pub const SILENT_FRAME_RATE: usize = 24000;

/// Roughly one second of encoded digital silence.
///
/// Every frame has zeroed side info and main data, which decodes to silence
/// without touching the bit reservoir of the neighbouring clips.
pub static MP3_SILENCE: [u8; SILENT_FRAME_LEN * SILENT_FRAME_COUNT] = build_silence();

const fn build_silence() -> [u8; SILENT_FRAME_LEN * SILENT_FRAME_COUNT] {
    let mut buf = [0u8; SILENT_FRAME_LEN * SILENT_FRAME_COUNT];
    let mut frame = 0;
    while frame < SILENT_FRAME_COUNT {
        let offset = frame * SILENT_FRAME_LEN;
        let mut i = 0;
        while i < SILENT_FRAME_HEADER.len() {
            buf[offset + i] = SILENT_FRAME_HEADER[i];
            i += 1;
        }
        frame += 1;
    }
    buf
}

/// Drop a leading ID3v2 tag. Tags with an inconsistent size are left alone.
pub fn strip_leading_id3v2(data: &[u8]) -> &[u8] {
    if data.len() < ID3V2_HEADER_LEN || &data[..3] != ID3V2_MAGIC {
        return data;
    }

    // synchsafe: 4 x 7 bits, big endian
    let size = data[6..10]
        .iter()
        .fold(0usize, |acc, byte| (acc << 7) | (*byte & 0x7F) as usize);
    let footer = if data[5] & ID3V2_FOOTER_FLAG != 0 {
        ID3V2_HEADER_LEN
    } else {
        0
    };
    let tag_len = ID3V2_HEADER_LEN + size + footer;

    if tag_len > data.len() {
        tracing::warn!(
            declared_size = tag_len,
            segment_size = data.len(),
            "ID3v2 tag larger than segment, leaving it in place"
        );
        return data;
    }

    &data[tag_len..]
}

/// Drop a trailing 128 byte ID3v1 tag
pub fn strip_trailing_id3v1(data: &[u8]) -> &[u8] {
    if data.len() < ID3V1_LEN {
        return data;
    }
    let tag_start = data.len() - ID3V1_LEN;
    if &data[tag_start..tag_start + 3] == ID3V1_MAGIC {
        &data[..tag_start]
    } else {
        data
    }
}

/// Join MP3 clips in order with [`MP3_SILENCE`] between neighbours.
///
/// The first clip keeps its leading tag and the last keeps its trailing tag,
/// so the file still carries one set of metadata. Never fails.
pub fn splice_mp3<S: AsRef<[u8]>>(segments: &[S]) -> Vec<u8> {
    let last = segments.len().saturating_sub(1);
    let cleaned: Vec<&[u8]> = segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let mut data = segment.as_ref();
            if index > 0 {
                data = strip_leading_id3v2(data);
            }
            if index < last {
                data = strip_trailing_id3v1(data);
            }
            data
        })
        .collect();

    let total = cleaned.iter().map(|c| c.len()).sum::<usize>() + MP3_SILENCE.len() * last;
    let mut out = Vec::with_capacity(total);
    for (index, data) in cleaned.iter().enumerate() {
        if index > 0 {
            out.extend_from_slice(&MP3_SILENCE);
        }
        out.extend_from_slice(data);
    }

    tracing::debug!(
        segment_count = segments.len(),
        output_size = out.len(),
        "MP3 segments spliced"
    );

    out
}
