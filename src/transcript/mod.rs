//! Caption track lookup and transcript assembly.
//!
//! Retrieval is two-step: list the tracks available for a video, then fetch
//! one track's timedtext document. [`fetch_transcript`] layers the language
//! fallback chain on top of any [`CaptionSource`], so tests run it against
//! a mock service.

pub mod api;
pub mod models;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::Config;
use crate::error::TranscriptError;

pub use models::{CaptionSegment, CaptionTrack};

use api::{PlayerRequest, PlayerResponse};

const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?prettyPrint=false";
const VIDEO_ID_LEN: usize = 11;
const FALLBACK_LANGUAGE: &str = "en";

/// Captions lookup service, keyed by video id.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, TranscriptError>;

    /// Fetch the timed segments of one track.
    async fn fetch_track(&self, track: &CaptionTrack)
        -> Result<Vec<CaptionSegment>, TranscriptError>;
}

/// Fetch a video's transcript, trying each preferred language in order and
/// then falling back to a manually authored English track, then an
/// auto-generated one. Within a language, manual tracks win over generated.
///
/// `Ok(None)` means no transcript exists in any acceptable language (or the
/// id is not a plausible video id — nothing is fetched in that case).
/// Terminal service failures (unavailable video, rate limiting, network)
/// come back as errors so the caller can decide whether to retry; see
/// [`TranscriptError::is_recoverable`].
pub async fn fetch_transcript(
    source: &dyn CaptionSource,
    video_id: &str,
    languages: &[String],
) -> Result<Option<String>, TranscriptError> {
    if video_id.len() != VIDEO_ID_LEN {
        debug!("Skipping transcript lookup for invalid video id {:?}", video_id);
        return Ok(None);
    }

    let tracks = match source.list_tracks(video_id).await {
        Ok(tracks) => tracks,
        Err(e) if e.is_skippable() => return Ok(None),
        Err(e) => return Err(e),
    };

    for lang in languages {
        if let Some(text) = try_language(source, &tracks, lang).await? {
            return Ok(Some(text));
        }
    }

    if let Some(text) = try_language(source, &tracks, FALLBACK_LANGUAGE).await? {
        return Ok(Some(text));
    }

    debug!("No usable caption track for video {}", video_id);
    Ok(None)
}

/// Try the manual track for a language, then the auto-generated one.
async fn try_language(
    source: &dyn CaptionSource,
    tracks: &[CaptionTrack],
    lang: &str,
) -> Result<Option<String>, TranscriptError> {
    for auto_generated in [false, true] {
        let track = tracks
            .iter()
            .find(|t| t.language_code == lang && t.auto_generated == auto_generated);
        let Some(track) = track else { continue };

        match source.fetch_track(track).await {
            Ok(segments) => return Ok(Some(join_segments(&segments))),
            Err(e) if e.is_skippable() => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Join all segment texts with single spaces, dropping empty segments.
pub fn join_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Captions client backed by the innertube player endpoint.
pub struct YouTubeCaptionClient {
    client: Client,
}

impl YouTubeCaptionClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl CaptionSource for YouTubeCaptionClient {
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, TranscriptError> {
        debug!("Listing caption tracks for video {}", video_id);

        let response = self
            .client
            .post(INNERTUBE_PLAYER_URL)
            .json(&PlayerRequest::for_video(video_id))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::RateLimited);
        }
        if !status.is_success() {
            return Err(TranscriptError::Network(format!(
                "Player endpoint returned status {}",
                status
            )));
        }

        let player: PlayerResponse = response
            .json()
            .await
            .map_err(|e| TranscriptError::Parse(format!("Invalid player response: {}", e)))?;

        if let Some(playability) = &player.playability_status {
            if playability.status != "OK" {
                let reason = playability
                    .reason
                    .clone()
                    .unwrap_or_else(|| playability.status.clone());
                return Err(TranscriptError::VideoUnavailable(reason));
            }
        }

        let Some(captions) = player.captions else {
            return Err(TranscriptError::CaptionsDisabled);
        };

        let tracks = captions
            .player_captions_tracklist_renderer
            .caption_tracks
            .into_iter()
            .map(|item| CaptionTrack {
                auto_generated: item.kind.as_deref() == Some("asr")
                    || item.vss_id.starts_with("a."),
                language_code: item.language_code,
                vss_id: item.vss_id,
                base_url: item.base_url,
            })
            .collect();
        Ok(tracks)
    }

    async fn fetch_track(
        &self,
        track: &CaptionTrack,
    ) -> Result<Vec<CaptionSegment>, TranscriptError> {
        debug!(
            "Fetching caption track {} ({})",
            track.vss_id, track.language_code
        );

        let response = self.client.get(&track.base_url).send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::RateLimited);
        }
        if !status.is_success() {
            return Err(TranscriptError::Network(format!(
                "Timedtext endpoint returned status {}",
                status
            )));
        }

        let xml = response.text().await?;
        parse_timedtext(&xml)
    }
}

/// Parse a timedtext document into ordered segments, decoding HTML entities.
fn parse_timedtext(xml: &str) -> Result<Vec<CaptionSegment>, TranscriptError> {
    #[derive(Debug, Deserialize)]
    struct Transcript {
        #[serde(rename = "text", default)]
        entries: Vec<TextEntry>,
    }

    #[derive(Debug, Deserialize)]
    struct TextEntry {
        start: f64,
        #[serde(default)]
        dur: f64,
        #[serde(rename = "$value", default)]
        text: String,
    }

    // serde-xml-rs stumbles over the declaration YouTube emits
    let cleaned = xml
        .trim()
        .replace(r#"<?xml version="1.0" encoding="utf-8" ?>"#, "")
        .trim()
        .to_string();

    let transcript: Transcript = serde_xml_rs::from_str(&cleaned)
        .map_err(|e| TranscriptError::Parse(format!("Invalid timedtext document: {}", e)))?;

    let segments = transcript
        .entries
        .into_iter()
        .map(|entry| CaptionSegment {
            text: html_escape::decode_html_entities(&entry.text).to_string(),
            start: entry.start,
            dur: entry.dur,
        })
        .collect();
    Ok(segments)
}
