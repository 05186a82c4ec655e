use serde::{Deserialize, Serialize};

/// One caption track advertised for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// BCP-47 language code as reported by the service (e.g. "en", "en-US")
    pub language_code: String,

    /// Track id; auto-generated tracks carry an `a.` prefix
    pub vss_id: String,

    /// Whether the track was machine-generated ("asr") rather than authored
    pub auto_generated: bool,

    /// URL of the timedtext document for this track
    pub base_url: String,
}

/// A single timed text segment of a caption track. Only the text is used
/// when assembling a transcript; timing is kept for completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    /// Segment start, seconds from video start
    pub start: f64,
    /// Segment duration in seconds
    pub dur: f64,
}
