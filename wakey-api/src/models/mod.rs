mod alarm;
mod bluetooth;
mod config;
mod hue;
mod radio;
mod spotify;
mod status;

pub use alarm::*;
pub use bluetooth::*;
pub use config::*;
pub use hue::*;
pub use radio::*;
pub use spotify::*;
pub use status::*;

use serde::{Deserialize, Serialize};

pub type Id = String;

/// Reply body of every mutating call that does not return the resource.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Whether the backend carried out the request
    pub ok: bool,
    /// Human readable failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Name of the station that started playing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Username issued by the Hue bridge on registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn failed<S: Into<String>>(error: S) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Body carrying a single volume value (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub volume: u8,
}

/// Body of the shuffle and repeat toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}
