//! Channel feed fetching and normalization.
//!
//! YouTube publishes an Atom feed of recent uploads per channel at
//! `/feeds/videos.xml?channel_id=<ID>`. This module builds that URL,
//! fetches the document, and flattens each entry into a [`VideoRecord`].

pub mod models;

use async_trait::async_trait;
use feed_rs::model::{Entry, Feed};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use url::Url;

use crate::config::{Config, DEFAULT_FEED_BASE_URL};
use crate::error::{Result, ScraperError};

pub use models::VideoRecord;

const FEED_PATH: &str = "/feeds/videos.xml";
const CHANNEL_ID_PREFIX: &str = "UC";

/// Entry ids in the feed look like `yt:video:dQw4w9WgXcQ`.
const VIDEO_ID_ENTRY_PREFIX: &str = "yt:video:";

/// Fallback patterns for pulling an 11-character video id out of a watch URL.
static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})")
            .expect("invalid watch-url pattern"),
        Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]{11})").expect("invalid embed-url pattern"),
    ]
});

/// Build the syndication feed URL for a channel.
///
/// Rejects identifiers that do not start with `UC`.
pub fn channel_feed_url(channel_id: &str) -> Result<String> {
    feed_url(DEFAULT_FEED_BASE_URL, channel_id)
}

pub(crate) fn feed_url(base_url: &str, channel_id: &str) -> Result<String> {
    if !channel_id.starts_with(CHANNEL_ID_PREFIX) {
        return Err(ScraperError::InvalidChannelId(channel_id.to_string()));
    }

    let mut url = Url::parse(base_url)
        .map_err(|e| ScraperError::Config(format!("Invalid feed base URL '{}': {}", base_url, e)))?;
    url.set_path(FEED_PATH);
    url.set_query(Some(&format!("channel_id={}", channel_id)));
    Ok(url.to_string())
}

/// Source of normalized video records for a channel.
///
/// The real implementation talks to the feed host; tests inject fakes.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_videos(&self, channel_id: &str) -> Result<Vec<VideoRecord>>;
}

/// Feed client backed by the public YouTube Atom feed.
pub struct YouTubeFeedClient {
    client: Client,
    base_url: String,
}

impl YouTubeFeedClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.feed_base_url.clone(),
        }
    }
}

#[async_trait]
impl FeedSource for YouTubeFeedClient {
    async fn fetch_videos(&self, channel_id: &str) -> Result<Vec<VideoRecord>> {
        let url = feed_url(&self.base_url, channel_id)?;
        debug!("Fetching channel feed: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScraperError::FeedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        let feed = feed_rs::parser::parse(bytes.as_ref())?;
        let videos = videos_from_feed(feed);
        debug!("Feed for {} yielded {} entries", channel_id, videos.len());
        Ok(videos)
    }
}

/// Flatten a parsed feed into video records, preserving entry order.
pub fn videos_from_feed(feed: Feed) -> Vec<VideoRecord> {
    feed.entries.into_iter().map(video_from_entry).collect()
}

fn video_from_entry(entry: Entry) -> VideoRecord {
    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let video_id = entry
        .id
        .strip_prefix(VIDEO_ID_ENTRY_PREFIX)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| extract_video_id(&link));

    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Untitled".to_string());

    // YouTube puts the description inside the media:group; a plain Atom
    // summary wins when both are present.
    let description = entry
        .summary
        .map(|t| t.content)
        .or_else(|| {
            entry
                .media
                .into_iter()
                .find_map(|m| m.description.map(|d| d.content))
        })
        .unwrap_or_default();

    let author = entry
        .authors
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();

    VideoRecord {
        title,
        url: link.clone(),
        video_id,
        published_at: entry.published,
        description,
        author,
        link,
        transcript: None,
    }
}

/// Pull a video id out of a watch URL when the feed carried no dedicated
/// id field. Returns `None` for URLs matching neither known shape.
pub fn extract_video_id(url: &str) -> Option<String> {
    for pattern in VIDEO_ID_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            return Some(caps[1].to_string());
        }
    }
    None
}
