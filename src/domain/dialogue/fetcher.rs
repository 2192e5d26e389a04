use super::error::SegmentFetchError;
use crate::domain::audio::EncodedSegment;
use crate::infrastructure::cache::{SegmentCache, SegmentKey};
use crate::infrastructure::repositories::{SegmentRequest, SpeechRepository};
use std::sync::Arc;

/// Fetches one encoded segment per request, synthesizing each distinct
/// request tuple at most once per cache lifetime.
pub struct SegmentFetcher {
    speech_repo: Arc<dyn SpeechRepository>,
    cache: Arc<SegmentCache>,
}

impl SegmentFetcher {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, cache: Arc<SegmentCache>) -> Self {
        Self { speech_repo, cache }
    }

    pub fn provider(&self) -> &'static str {
        self.speech_repo.provider()
    }

    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    pub async fn fetch(&self, request: &SegmentRequest) -> Result<EncodedSegment, SegmentFetchError> {
        let key = SegmentKey::from(request);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(
                voice = %request.voice,
                format = %request.format,
                cache_hit = true,
                segment_size = cached.len(),
                "Segment served from cache"
            );
            return Ok(cached);
        }

        let audio = self
            .speech_repo
            .synthesize(request)
            .await
            .map_err(SegmentFetchError)?;

        if audio.is_empty() {
            return Err(SegmentFetchError(
                "speech provider returned no audio".to_string(),
            ));
        }

        let segment = EncodedSegment::new(audio, request.format);
        self.cache.insert(key, segment.clone()).await;

        tracing::debug!(
            voice = %request.voice,
            format = %request.format,
            cache_hit = false,
            segment_size = segment.len(),
            "Segment synthesized and cached"
        );

        Ok(segment)
    }
}
