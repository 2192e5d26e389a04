use crate::domain::audio::{AudioFormat, EncodedSegment};
use crate::domain::dialogue::LanguageCode;
use crate::infrastructure::repositories::SegmentRequest;
use moka::future::Cache;

/// Exact request tuple a segment was synthesized from.
/// Speed is keyed by its bit pattern so that only identical values share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub text: String,
    pub voice: String,
    pub language: LanguageCode,
    pub speed_bits: u32,
    pub format: AudioFormat,
}

impl From<&SegmentRequest> for SegmentKey {
    fn from(request: &SegmentRequest) -> Self {
        Self {
            text: request.text.clone(),
            voice: request.voice.clone(),
            language: request.language,
            speed_bits: request.speed.to_bits(),
            format: request.format,
        }
    }
}

/// Write-once cache of synthesized segments, shared by every job of the process.
///
/// No capacity or idle limit: entries live as long as the cache handle.
#[derive(Clone)]
pub struct SegmentCache {
    inner: Cache<SegmentKey, EncodedSegment>,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    pub async fn get(&self, key: &SegmentKey) -> Option<EncodedSegment> {
        self.inner.get(key).await
    }

    /// Store a segment unless one is already cached for the key
    pub async fn insert(&self, key: SegmentKey, segment: EncodedSegment) {
        if self.inner.contains_key(&key) {
            return;
        }
        self.inner.insert(key, segment).await;
    }

    /// Approximate number of cached segments
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for SegmentCache {
    fn default() -> Self {
        Self::new()
    }
}
