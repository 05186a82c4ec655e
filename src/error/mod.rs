use thiserror::Error;

/// Errors surfaced by feed fetching and channel orchestration.
#[derive(Debug, Clone, Error)]
pub enum ScraperError {
    /// Channel identifier does not start with the required `UC` prefix
    #[error("Invalid channel id (must start with 'UC'): {0}")]
    InvalidChannelId(String),

    /// Network/connectivity issues while fetching a feed
    #[error("Network Error: {0}")]
    Network(String),

    /// Feed endpoint answered with a non-success HTTP status
    #[error("Feed HTTP Error: status {status} for {url}")]
    FeedStatus { status: u16, url: String },

    /// Syndication document could not be parsed
    #[error("Feed Parse Error: {0}")]
    FeedParse(String),

    /// Configuration errors (e.g. an unparseable feed base URL)
    #[error("Config Error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ScraperError {
    fn from(err: reqwest::Error) -> Self {
        ScraperError::Network(err.to_string())
    }
}

impl From<feed_rs::parser::ParseFeedError> for ScraperError {
    fn from(err: feed_rs::parser::ParseFeedError) -> Self {
        ScraperError::FeedParse(err.to_string())
    }
}

/// Closed set of failure kinds for the captions service.
///
/// The original implementation collapsed all of these into "no transcript".
/// Keeping them distinct lets callers of [`crate::transcript::fetch_transcript`]
/// decide whether a rate-limited lookup is worth retrying; the orchestration
/// layer still degrades every kind to an absent transcript.
#[derive(Debug, Clone, Error)]
pub enum TranscriptError {
    /// No caption track exists for the requested language
    #[error("No caption track for language '{0}'")]
    NoTrackForLanguage(String),

    /// Captions are disabled for this video
    #[error("Captions are disabled for this video")]
    CaptionsDisabled,

    /// Video is private, deleted, or otherwise unavailable
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    /// Captions service reported rate limiting (HTTP 429)
    #[error("Captions service rate limit exceeded")]
    RateLimited,

    /// Network/connectivity issues while talking to the captions service
    #[error("Network Error: {0}")]
    Network(String),

    /// Malformed player response or caption track payload
    #[error("Caption Parse Error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        TranscriptError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TranscriptError {
    fn from(err: serde_json::Error) -> Self {
        TranscriptError::Parse(format!("JSON deserialization error: {}", err))
    }
}

impl TranscriptError {
    /// Determines if a lookup could succeed when repeated later.
    pub fn is_recoverable(&self) -> bool {
        match self {
            TranscriptError::NoTrackForLanguage(_) => false,
            TranscriptError::CaptionsDisabled => false,
            TranscriptError::VideoUnavailable(_) => false,
            TranscriptError::RateLimited => true,
            TranscriptError::Network(_) => true,
            TranscriptError::Parse(_) => false,
        }
    }

    /// Expected per-language outcomes: the fallback chain skips these and
    /// tries the next candidate track instead of aborting.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            TranscriptError::NoTrackForLanguage(_) | TranscriptError::CaptionsDisabled
        )
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
