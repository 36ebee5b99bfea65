use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::Id;

/// Runtime phase of the alarm engine as reported by `GET /api/status`.
///
/// States the client does not know are kept verbatim so they can still be
/// shown to the user.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlarmState {
    #[default]
    Idle,
    Sunrise,
    Active,
    Snoozed,
    Other(String),
}

impl From<String> for AlarmState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "idle" => AlarmState::Idle,
            "sunrise" => AlarmState::Sunrise,
            "active" => AlarmState::Active,
            "snoozed" => AlarmState::Snoozed,
            _ => AlarmState::Other(value),
        }
    }
}

impl From<AlarmState> for String {
    fn from(value: AlarmState) -> Self {
        value.to_string()
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlarmState::Idle => write!(f, "idle"),
            AlarmState::Sunrise => write!(f, "sunrise"),
            AlarmState::Active => write!(f, "active"),
            AlarmState::Snoozed => write!(f, "snoozed"),
            AlarmState::Other(raw) => write!(f, "{raw}"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRuntimeStatus {
    pub state: AlarmState,
    /// Alarm currently sounding or ramping, if any
    #[serde(default)]
    pub active_alarm_id: Option<Id>,
    /// RFC 3339 timestamp of the next scheduled fire
    #[serde(default)]
    pub next_fire_time: Option<String>,
}

impl AlarmRuntimeStatus {
    /// Parsed next fire time; unparseable timestamps count as missing.
    pub fn next_fire_at(&self) -> Option<OffsetDateTime> {
        self.next_fire_time
            .as_deref()
            .and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok())
    }
}

/// Reply of `POST /api/snooze`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoozeResponse {
    pub ok: bool,
    #[serde(default)]
    pub snooze_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_unknown_state_is_preserved() {
        let status: AlarmRuntimeStatus =
            serde_json::from_value(json!({ "state": "ramping" })).unwrap();

        assert_eq!(status.state, AlarmState::Other("ramping".to_string()));
        assert_eq!(serde_json::to_value(&status.state).unwrap(), json!("ramping"));
    }

    #[test]
    fn test_next_fire_at_parses_offset_timestamps() {
        let status = AlarmRuntimeStatus {
            state: AlarmState::Idle,
            active_alarm_id: None,
            next_fire_time: Some("2026-10-20T07:00:00+02:00".to_string()),
        };

        assert_eq!(status.next_fire_at(), Some(datetime!(2026-10-20 05:00 UTC)));
    }

    #[test]
    fn test_next_fire_at_ignores_garbage() {
        let status = AlarmRuntimeStatus {
            next_fire_time: Some("tomorrow".to_string()),
            ..Default::default()
        };

        assert_eq!(status.next_fire_at(), None);
    }
}
