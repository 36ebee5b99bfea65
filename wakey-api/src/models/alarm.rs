use serde::{Deserialize, Serialize};

use super::Id;

/// Weekday abbreviations indexed by day number (0 = Monday).
pub const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const WEEKDAYS: [u8; 5] = [0, 1, 2, 3, 4];

pub const WEEKEND: [u8; 2] = [5, 6];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    #[default]
    Radio,
    Spotify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Where the wake-up audio comes from
    #[serde(default)]
    pub source: AudioSource,
    /// Radio station identifier
    #[serde(default)]
    pub station: Id,
    /// Spotify context URI, used when the source is Spotify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_uri: Option<String>,
    /// Target volume percentage (0-100)
    pub volume: u8,
    /// Seconds spent ramping up to the target volume
    pub ramp_seconds: u32,
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            source: AudioSource::Radio,
            station: String::new(),
            spotify_uri: None,
            volume: 70,
            ramp_seconds: 30,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingConfig {
    pub enabled: bool,
    /// Hue rooms or zones lit by the sunrise
    #[serde(default)]
    pub rooms: Vec<Id>,
    /// Scene recalled instead of the plain warm ramp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Id>,
    /// Warmth percentage (0 = coolest, 100 = warmest)
    pub warmth: u8,
    /// Minutes before the fire time the sunrise starts
    pub offset_minutes: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rooms: Vec::new(),
            scene: None,
            warmth: 50,
            offset_minutes: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Id,
    /// Fire time, "HH:MM" on a 24 hour clock
    pub time: String,
    #[serde(default)]
    pub label: String,
    /// Weekday numbers, 0 = Monday .. 6 = Sunday
    pub days: Vec<u8>,
    pub enabled: bool,
    pub audio: AudioConfig,
    pub hue: LightingConfig,
    pub snooze_minutes: u32,
    pub auto_stop_minutes: u32,
}

/// Body of `POST /api/alarms` and of a full `PUT /api/alarms/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRequest {
    pub time: String,
    #[serde(default)]
    pub label: String,
    pub days: Vec<u8>,
    pub enabled: bool,
    pub audio: AudioConfig,
    pub hue: LightingConfig,
    pub snooze_minutes: u32,
    pub auto_stop_minutes: u32,
}

impl Default for AlarmRequest {
    fn default() -> Self {
        Self {
            time: String::from("07:00"),
            label: String::new(),
            days: WEEKDAYS.to_vec(),
            enabled: true,
            audio: AudioConfig::default(),
            hue: LightingConfig::default(),
            snooze_minutes: 9,
            auto_stop_minutes: 30,
        }
    }
}

impl AlarmRequest {
    pub fn into_alarm(self, id: Id) -> Alarm {
        Alarm {
            id,
            time: self.time,
            label: self.label,
            days: self.days,
            enabled: self.enabled,
            audio: self.audio,
            hue: self.hue,
            snooze_minutes: self.snooze_minutes,
            auto_stop_minutes: self.auto_stop_minutes,
        }
    }
}

impl From<Alarm> for AlarmRequest {
    fn from(alarm: Alarm) -> Self {
        Self {
            time: alarm.time,
            label: alarm.label,
            days: alarm.days,
            enabled: alarm.enabled,
            audio: alarm.audio,
            hue: alarm.hue,
            snooze_minutes: alarm.snooze_minutes,
            auto_stop_minutes: alarm.auto_stop_minutes,
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<LightingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_stop_minutes: Option<u32>,
}

impl AlarmUpdate {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn apply(self, alarm: &mut Alarm) {
        if let Some(time) = self.time {
            alarm.time = time;
        }
        if let Some(label) = self.label {
            alarm.label = label;
        }
        if let Some(days) = self.days {
            alarm.days = days;
        }
        if let Some(enabled) = self.enabled {
            alarm.enabled = enabled;
        }
        if let Some(audio) = self.audio {
            alarm.audio = audio;
        }
        if let Some(hue) = self.hue {
            alarm.hue = hue;
        }
        if let Some(snooze) = self.snooze_minutes {
            alarm.snooze_minutes = snooze;
        }
        if let Some(auto_stop) = self.auto_stop_minutes {
            alarm.auto_stop_minutes = auto_stop;
        }
    }
}

impl From<AlarmRequest> for AlarmUpdate {
    fn from(request: AlarmRequest) -> Self {
        Self {
            time: Some(request.time),
            label: Some(request.label),
            days: Some(request.days),
            enabled: Some(request.enabled),
            audio: Some(request.audio),
            hue: Some(request.hue),
            snooze_minutes: Some(request.snooze_minutes),
            auto_stop_minutes: Some(request.auto_stop_minutes),
        }
    }
}
