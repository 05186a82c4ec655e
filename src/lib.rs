pub mod config;
pub mod error;
pub mod feed;
pub mod scraper;
pub mod transcript;
pub mod utils;

// Re-export the caller-facing surface
pub use config::Config;
pub use error::{Result, ScraperError, TranscriptError};
pub use feed::{channel_feed_url, extract_video_id, FeedSource, VideoRecord};
pub use scraper::{filter_videos_by_time, ChannelScraper, FetchOptions};
pub use transcript::{fetch_transcript, CaptionSegment, CaptionSource, CaptionTrack};
