//! Channel orchestration: feed fetch → time filter → optional transcripts.

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::feed::{FeedSource, VideoRecord, YouTubeFeedClient};
use crate::transcript::{fetch_transcript, CaptionSource, YouTubeCaptionClient};

/// Per-call fetch parameters.
///
/// `Default` carries the stock 24-hour window and English-only language
/// preference; each call gets its own value, so there is no shared default
/// list to alias.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Recency window in hours
    pub window_hours: i64,
    /// Attach caption text to each retained record
    pub with_transcripts: bool,
    /// Preferred caption languages, in order
    pub languages: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            window_hours: 24,
            with_transcripts: false,
            languages: vec!["en".to_string()],
        }
    }
}

impl FetchOptions {
    /// Options seeded from the runtime configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            window_hours: config.window_hours,
            with_transcripts: false,
            languages: config.transcript_languages.clone(),
        }
    }

    pub fn with_transcripts(mut self, enabled: bool) -> Self {
        self.with_transcripts = enabled;
        self
    }
}

/// Keep only records published within the last `hours` hours.
pub fn filter_videos_by_time(videos: Vec<VideoRecord>, hours: i64) -> Vec<VideoRecord> {
    let cutoff = Utc::now() - Duration::hours(hours);
    filter_videos_since(videos, cutoff)
}

/// Keep only records published at or after `cutoff`, preserving order.
/// Records without a timestamp are dropped.
pub fn filter_videos_since(
    videos: Vec<VideoRecord>,
    cutoff: DateTime<Utc>,
) -> Vec<VideoRecord> {
    videos
        .into_iter()
        .filter(|v| v.published_at.map_or(false, |ts| ts >= cutoff))
        .collect()
}

/// Composes the feed and captions clients into the caller-facing surface.
pub struct ChannelScraper {
    feed: Arc<dyn FeedSource>,
    captions: Arc<dyn CaptionSource>,
}

impl ChannelScraper {
    /// Scraper wired to the live YouTube endpoints.
    pub fn new(config: &Config) -> Self {
        Self {
            feed: Arc::new(YouTubeFeedClient::new(config)),
            captions: Arc::new(YouTubeCaptionClient::new(config)),
        }
    }

    /// Scraper over caller-provided service implementations.
    pub fn with_sources(feed: Arc<dyn FeedSource>, captions: Arc<dyn CaptionSource>) -> Self {
        Self { feed, captions }
    }

    /// Fetch a channel's recent videos, optionally attaching transcripts.
    ///
    /// Invalid channel ids and malformed feeds surface as errors; every
    /// transcript failure degrades to an absent transcript.
    pub async fn fetch_channel_videos(
        &self,
        channel_id: &str,
        options: &FetchOptions,
    ) -> Result<Vec<VideoRecord>> {
        let all_videos = self.feed.fetch_videos(channel_id).await?;
        let mut recent = filter_videos_by_time(all_videos, options.window_hours);
        info!(
            "Channel {}: {} video(s) within the last {}h",
            channel_id,
            recent.len(),
            options.window_hours
        );

        if options.with_transcripts {
            for video in recent.iter_mut() {
                video.transcript = match &video.video_id {
                    Some(id) => self.transcript_or_none(id, &options.languages).await,
                    None => None,
                };
            }
        }

        Ok(recent)
    }

    /// Fetch several channels sequentially. A failing channel is logged and
    /// mapped to an empty list; the others are unaffected.
    pub async fn fetch_multiple_channels(
        &self,
        channel_ids: &[String],
        options: &FetchOptions,
    ) -> HashMap<String, Vec<VideoRecord>> {
        let mut results = HashMap::new();
        for channel_id in channel_ids {
            let videos = match self.fetch_channel_videos(channel_id, options).await {
                Ok(videos) => videos,
                Err(e) => {
                    warn!("Failed to fetch channel {}: {}", channel_id, e);
                    Vec::new()
                }
            };
            results.insert(channel_id.clone(), videos);
        }
        results
    }

    async fn transcript_or_none(&self, video_id: &str, languages: &[String]) -> Option<String> {
        match fetch_transcript(self.captions.as_ref(), video_id, languages).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Transcript lookup failed for video {}: {}", video_id, e);
                None
            }
        }
    }
}
