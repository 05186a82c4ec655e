//! Integration tests for channel orchestration over mock services.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use yt_scraper::error::{Result, ScraperError, TranscriptError};
use yt_scraper::feed::{FeedSource, VideoRecord};
use yt_scraper::scraper::{ChannelScraper, FetchOptions};
use yt_scraper::transcript::{CaptionSegment, CaptionSource, CaptionTrack};

/// Mock feed source serving canned records per channel.
struct MockFeed {
    videos: HashMap<String, Vec<VideoRecord>>,
    failing: HashSet<String>,
}

impl MockFeed {
    fn new() -> Self {
        Self {
            videos: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    fn with_channel(mut self, channel_id: &str, videos: Vec<VideoRecord>) -> Self {
        self.videos.insert(channel_id.to_string(), videos);
        self
    }

    fn with_failing_channel(mut self, channel_id: &str) -> Self {
        self.failing.insert(channel_id.to_string());
        self
    }
}

#[async_trait]
impl FeedSource for MockFeed {
    async fn fetch_videos(&self, channel_id: &str) -> Result<Vec<VideoRecord>> {
        if self.failing.contains(channel_id) {
            return Err(ScraperError::FeedParse("mock feed failure".to_string()));
        }
        Ok(self.videos.get(channel_id).cloned().unwrap_or_default())
    }
}

/// Mock captions service with one English track per known video.
struct MockCaptions {
    known_videos: HashSet<String>,
}

impl MockCaptions {
    fn knowing(video_ids: &[&str]) -> Self {
        Self {
            known_videos: video_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn empty() -> Self {
        Self {
            known_videos: HashSet::new(),
        }
    }
}

#[async_trait]
impl CaptionSource for MockCaptions {
    async fn list_tracks(&self, video_id: &str) -> std::result::Result<Vec<CaptionTrack>, TranscriptError> {
        if !self.known_videos.contains(video_id) {
            return Err(TranscriptError::VideoUnavailable(video_id.to_string()));
        }
        Ok(vec![CaptionTrack {
            language_code: "en".to_string(),
            vss_id: format!(".{}", video_id),
            auto_generated: false,
            base_url: format!("https://timedtext.test/{}", video_id),
        }])
    }

    async fn fetch_track(
        &self,
        track: &CaptionTrack,
    ) -> std::result::Result<Vec<CaptionSegment>, TranscriptError> {
        Ok(vec![
            CaptionSegment {
                text: format!("transcript for {}", &track.vss_id[1..]),
                start: 0.0,
                dur: 1.0,
            },
            CaptionSegment {
                text: "end".to_string(),
                start: 1.0,
                dur: 1.0,
            },
        ])
    }
}

fn video(title: &str, video_id: Option<&str>, hours_ago: Option<i64>) -> VideoRecord {
    VideoRecord {
        title: title.to_string(),
        url: video_id
            .map(|id| format!("https://www.youtube.com/watch?v={}", id))
            .unwrap_or_default(),
        video_id: video_id.map(str::to_string),
        published_at: hours_ago.map(|h| Utc::now() - Duration::hours(h)),
        description: String::new(),
        author: "Example Channel".to_string(),
        link: String::new(),
        transcript: None,
    }
}

#[tokio::test]
async fn one_failing_channel_does_not_abort_the_others() {
    let feed = MockFeed::new()
        .with_channel("UCgood", vec![video("recent", Some("dQw4w9WgXcQ"), Some(1))])
        .with_failing_channel("UCbroken");
    let scraper = ChannelScraper::with_sources(Arc::new(feed), Arc::new(MockCaptions::empty()));

    let channels = vec!["UCgood".to_string(), "UCbroken".to_string()];
    let results = scraper
        .fetch_multiple_channels(&channels, &FetchOptions::default())
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results["UCgood"].len(), 1);
    assert_eq!(results["UCgood"][0].title, "recent");
    assert!(results["UCbroken"].is_empty());
}

#[tokio::test]
async fn filters_by_window_and_preserves_feed_order() {
    let feed = MockFeed::new().with_channel(
        "UCorder",
        vec![
            video("newest", Some("aaaaaaaaaaa"), Some(1)),
            video("older", Some("bbbbbbbbbbb"), Some(5)),
            video("undated", Some("ccccccccccc"), None),
            video("stale", Some("ddddddddddd"), Some(48)),
        ],
    );
    let scraper = ChannelScraper::with_sources(Arc::new(feed), Arc::new(MockCaptions::empty()));

    let videos = scraper
        .fetch_channel_videos("UCorder", &FetchOptions::default())
        .await
        .unwrap();

    let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "older"]);
}

#[tokio::test]
async fn attaches_transcripts_only_when_requested() {
    let feed = MockFeed::new().with_channel(
        "UCsubs",
        vec![
            video("captioned", Some("dQw4w9WgXcQ"), Some(1)),
            video("no id", None, Some(2)),
        ],
    );
    let captions = MockCaptions::knowing(&["dQw4w9WgXcQ"]);
    let scraper = ChannelScraper::with_sources(Arc::new(feed), Arc::new(captions));

    let plain = scraper
        .fetch_channel_videos("UCsubs", &FetchOptions::default())
        .await
        .unwrap();
    assert!(plain.iter().all(|v| v.transcript.is_none()));

    let options = FetchOptions::default().with_transcripts(true);
    let with_subs = scraper
        .fetch_channel_videos("UCsubs", &options)
        .await
        .unwrap();
    assert_eq!(
        with_subs[0].transcript.as_deref(),
        Some("transcript for dQw4w9WgXcQ end")
    );
    // No video id means no lookup and no transcript
    assert!(with_subs[1].transcript.is_none());
}

#[tokio::test]
async fn transcript_failures_degrade_to_absent_transcripts() {
    let feed = MockFeed::new().with_channel(
        "UCflaky",
        vec![video("unavailable", Some("eeeeeeeeeee"), Some(1))],
    );
    // MockCaptions::empty reports every video as unavailable
    let scraper = ChannelScraper::with_sources(Arc::new(feed), Arc::new(MockCaptions::empty()));

    let options = FetchOptions::default().with_transcripts(true);
    let videos = scraper
        .fetch_channel_videos("UCflaky", &options)
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert!(videos[0].transcript.is_none());
}
