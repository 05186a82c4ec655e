use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One video entry normalized out of a channel's syndication feed.
///
/// Lives only for the duration of a fetch call; `transcript` is attached
/// afterwards when captions were requested, and stays `None` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Video title ("Untitled" when the feed entry carries none)
    pub title: String,

    /// Canonical watch URL
    pub url: String,

    /// 11-character video identifier, when one could be determined
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,

    /// Publish timestamp (UTC); absent when the feed date was unparseable
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,

    /// Summary/description text
    pub description: String,

    /// Channel name
    pub author: String,

    /// Entry link (same as `url`)
    pub link: String,

    /// Caption text, populated only when transcripts were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}
