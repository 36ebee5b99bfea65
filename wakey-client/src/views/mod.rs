//! Per-screen state. Each panel owns what it displays and is driven through
//! explicit calls that take the [`ApiClient`](crate::api::ApiClient).

mod alarms;
mod bluetooth;
mod lights;
mod radio;
mod settings;
mod spotify;
mod status;

pub use alarms::*;
pub use bluetooth::*;
pub use lights::*;
pub use radio::*;
pub use settings::*;
pub use spotify::*;
pub use status::*;

use crate::error::Error;

/// Load state of a panel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Unloaded,
    Loading,
    Idle,
    /// Something is playing, connected or lit
    Active,
    Error(String),
}

impl Phase {
    pub fn from_active(active: bool) -> Self {
        if active { Phase::Active } else { Phase::Idle }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Ok,
    Err,
}

/// Short feedback line shown under a panel's controls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
}

impl Notice {
    pub fn neutral<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn ok<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Ok,
        }
    }

    pub fn err<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Err,
        }
    }

    /// The server's own message when it sent one, otherwise `fallback`.
    pub fn failure(error: &Error, fallback: &str) -> Self {
        tracing::warn!("{}: {}", fallback, error);
        Self::err(error.server_message().unwrap_or(fallback))
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_uses_server_message() {
        let error = Error::Rejected("Unknown station".to_string());
        let notice = Notice::failure(&error, "Failed to play");

        assert_eq!(notice, Notice::err("Unknown station"));
    }

    #[test]
    fn test_failure_falls_back_without_server_message() {
        let error = Error::Rejected(String::new());
        assert_eq!(Notice::failure(&error, "Scan failed").text, "Scan failed");

        let error = Error::config("unreachable");
        assert_eq!(Notice::failure(&error, "Failed").text, "Failed");
    }
}
