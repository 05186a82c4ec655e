//! Innertube player endpoint wire structures.
//!
//! Listing caption tracks goes through the same `player` endpoint the
//! mobile clients use; the ANDROID client context keeps the payload small
//! and needs no signature handshake.

use serde::{Deserialize, Serialize};

/// Request body for the innertube `/player` endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub context: RequestContext,
    pub video_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub client: ClientInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_version: String,
    pub android_sdk_version: u32,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            client_name: "ANDROID".to_string(),
            client_version: "19.09.37".to_string(),
            android_sdk_version: 30,
        }
    }
}

impl PlayerRequest {
    pub fn for_video(video_id: &str) -> Self {
        Self {
            context: RequestContext {
                client: ClientInfo::default(),
            },
            video_id: video_id.to_string(),
        }
    }
}

/// Player endpoint response, reduced to the fields consumed here
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub captions: Option<Captions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    pub player_captions_tracklist_renderer: TracklistRenderer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracklistRenderer {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrackItem {
    pub base_url: String,
    #[serde(default)]
    pub vss_id: String,
    pub language_code: String,
    /// `"asr"` marks an auto-generated track
    pub kind: Option<String>,
}
