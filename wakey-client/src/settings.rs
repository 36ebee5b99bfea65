use std::env;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Where the backend lives and how often each panel refreshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub base_url: String,
    /// Per-request limit; requests wait indefinitely when unset
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    pub clock_interval_ms: u64,
    pub status_interval_ms: u64,
    pub spotify_interval_ms: u64,
    pub scene_refresh_delay_ms: u64,
    pub transport_refresh_delay_ms: u64,
}

impl Client {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn spotify_interval(&self) -> Duration {
        Duration::from_millis(self.spotify_interval_ms)
    }

    pub fn scene_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.scene_refresh_delay_ms)
    }

    pub fn transport_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.transport_refresh_delay_ms)
    }
}

impl Client {
    /// Polling periods must be positive; the delays may be zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("client.base_url must not be empty"));
        }

        let periods = [
            ("clock_interval_ms", self.clock_interval_ms),
            ("status_interval_ms", self.status_interval_ms),
            ("spotify_interval_ms", self.spotify_interval_ms),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, millis)| *millis == 0) {
            return Err(Error::config(format!("client.{name} must be greater than zero")));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(Error::config("client.request_timeout_ms must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for Client {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_ms: None,
            clock_interval_ms: 1_000,
            status_interval_ms: 2_000,
            spotify_interval_ms: 3_000,
            scene_refresh_delay_ms: 500,
            transport_refresh_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub client: Client,
}

impl Settings {
    /// Loads the embedded defaults, or the file named by `WAKEY_CONFIG`.
    pub fn new() -> Result<Self> {
        let raw = match env::var("WAKEY_CONFIG") {
            Ok(path) => fs::read_to_string(&path)
                .map_err(|e| Error::config(format!("cannot read {path}: {e}")))?,
            Err(_) => include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../",
                "configs/default.toml"
            ))
            .to_string(),
        };

        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(raw).map_err(Error::config)?;

        settings.client.validate()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../configs/default.toml"));
        let settings = Settings::from_toml(raw).unwrap();

        assert_eq!(settings.client.status_interval(), Duration::from_secs(2));
        assert_eq!(settings.client.spotify_interval(), Duration::from_secs(3));
        assert_eq!(settings.client.scene_refresh_delay(), Duration::from_millis(500));
        assert_eq!(settings.client.request_timeout(), None);
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let raw = r#"
            [logger]
            level = "debug"

            [client]
            base_url = " "
            clock_interval_ms = 1000
            status_interval_ms = 2000
            spotify_interval_ms = 3000
            scene_refresh_delay_ms = 500
            transport_refresh_delay_ms = 300
        "#;

        assert!(matches!(Settings::from_toml(raw), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_polling_interval_is_rejected() {
        let raw = r#"
            [logger]
            level = "info"

            [client]
            base_url = "http://127.0.0.1:8000"
            clock_interval_ms = 1000
            status_interval_ms = 0
            spotify_interval_ms = 3000
            scene_refresh_delay_ms = 0
            transport_refresh_delay_ms = 0
        "#;

        let err = Settings::from_toml(raw).unwrap_err();
        assert!(err.to_string().contains("status_interval_ms"));
    }

    #[test]
    fn test_zero_delays_and_explicit_timeout_are_accepted() {
        let raw = r#"
            [logger]
            level = "info"

            [client]
            base_url = "http://127.0.0.1:8000"
            request_timeout_ms = 5000
            clock_interval_ms = 1000
            status_interval_ms = 2000
            spotify_interval_ms = 3000
            scene_refresh_delay_ms = 0
            transport_refresh_delay_ms = 0
        "#;

        let settings = Settings::from_toml(raw).unwrap();
        assert_eq!(settings.client.request_timeout(), Some(Duration::from_secs(5)));
    }
}
