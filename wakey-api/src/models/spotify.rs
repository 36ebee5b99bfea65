use serde::{Deserialize, Serialize};

use super::Id;

/// Playback state of the Spotify Connect receiver.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyStatus {
    /// Whether the receiver answers at all
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub playing: bool,
    #[serde(default)]
    pub paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub repeat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyPreset {
    pub id: Id,
    pub name: String,
    /// Spotify context URI (playlist, album or track)
    pub uri: String,
}

/// Body of `POST /api/spotify/presets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPreset {
    pub name: String,
    pub uri: String,
}

/// Body of `POST /api/spotify/play`; without a URI playback resumes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyPlayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
