use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use wakey_api::models::*;

use super::{Notice, Phase};
use crate::api::ApiClient;
use crate::error::{Error, Result};

/// Latest Spotify reading, written by the poller and by optimistic updates.
pub type SpotifyFeed = Arc<watch::Sender<SpotifyStatus>>;

/// Spotify tab of the Music view.
#[derive(Debug)]
pub struct SpotifyPanel {
    pub phase: Phase,
    pub presets: Vec<SpotifyPreset>,
    pub notice: Notice,
    feed: SpotifyFeed,
    /// Delayed re-poll after the last transport command
    refresh: Option<JoinHandle<()>>,
}

impl Default for SpotifyPanel {
    fn default() -> Self {
        Self {
            phase: Phase::Unloaded,
            presets: Vec::new(),
            notice: Notice::default(),
            feed: Arc::new(watch::Sender::new(SpotifyStatus::default())),
            refresh: None,
        }
    }
}

impl SpotifyPanel {
    pub fn feed(&self) -> SpotifyFeed {
        self.feed.clone()
    }

    pub fn status(&self) -> SpotifyStatus {
        self.feed.borrow().clone()
    }

    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.phase = Phase::Loading;

        match api.spotify_presets().await {
            Ok(presets) => self.presets = presets,
            Err(e) => tracing::debug!("No Spotify presets: {}", e),
        }

        match api.spotify_status().await {
            Ok(status) => {
                self.phase = if status.available {
                    Phase::from_active(status.playing)
                } else {
                    Phase::Error("Spotify receiver unavailable".to_string())
                };
                self.feed.send_replace(status);
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load Spotify");
                Err(e)
            }
        }
    }

    /// One poll; failures keep the previous reading.
    pub async fn poll(api: &ApiClient, feed: &SpotifyFeed) {
        match api.spotify_status().await {
            Ok(status) => {
                feed.send_replace(status);
            }
            Err(e) => tracing::debug!("Spotify poll failed: {}", e),
        }
    }

    /// Re-polls once after `delay` so a transport command shows up quickly.
    /// A newer command replaces a re-poll that has not run yet.
    fn refresh_after(&mut self, api: &ApiClient, delay: Duration) {
        let api = api.clone();
        let feed = self.feed.clone();

        self.cancel_refresh();
        self.refresh = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            SpotifyPanel::poll(&api, &feed).await;
        }));
    }

    /// Drops a pending transport re-poll.
    pub fn cancel_refresh(&mut self) {
        if let Some(refresh) = self.refresh.take() {
            refresh.abort();
        }
    }

    fn transport(&mut self, api: &ApiClient, result: Result<Ack>, delay: Duration) -> Result<()> {
        let outcome = match result {
            Ok(_) => Ok(()),
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed");
                Err(e)
            }
        };
        self.refresh_after(api, delay);
        outcome
    }

    pub async fn play_pause(&mut self, api: &ApiClient, delay: Duration) -> Result<()> {
        let result = api.spotify_play_pause().await;
        self.transport(api, result, delay)
    }

    pub async fn next(&mut self, api: &ApiClient, delay: Duration) -> Result<()> {
        let result = api.spotify_next().await;
        self.transport(api, result, delay)
    }

    pub async fn previous(&mut self, api: &ApiClient, delay: Duration) -> Result<()> {
        let result = api.spotify_previous().await;
        self.transport(api, result, delay)
    }

    /// Sends the opposite of the shuffle flag currently shown.
    pub async fn toggle_shuffle(&mut self, api: &ApiClient, delay: Duration) -> Result<()> {
        let enabled = !self.feed.borrow().shuffle;
        self.feed.send_modify(|status| status.shuffle = enabled);

        let result = api.spotify_shuffle(enabled).await;
        self.transport(api, result, delay)
    }

    /// Sends the opposite of the repeat flag currently shown.
    pub async fn toggle_repeat(&mut self, api: &ApiClient, delay: Duration) -> Result<()> {
        let enabled = !self.feed.borrow().repeat;
        self.feed.send_modify(|status| status.repeat = enabled);

        let result = api.spotify_repeat(enabled).await;
        self.transport(api, result, delay)
    }

    pub async fn add_preset(&mut self, api: &ApiClient, name: &str, uri: &str) -> Result<()> {
        let (name, uri) = (name.trim(), uri.trim());
        if name.is_empty() || uri.is_empty() {
            self.notice = Notice::err("Name and URI required");
            return Err(Error::Rejected("Name and URI required".to_string()));
        }

        let preset = NewPreset {
            name: name.to_string(),
            uri: uri.to_string(),
        };
        match api.add_spotify_preset(&preset).await {
            Ok(preset) => {
                self.notice = Notice::ok(format!("Saved {}", preset.name));
                self.presets.push(preset);
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed to save preset");
                Err(e)
            }
        }
    }

    pub async fn delete_preset(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        match api.delete_spotify_preset(id).await {
            Ok(_) => {
                self.presets.retain(|preset| preset.id != id);
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed");
                Err(e)
            }
        }
    }

    pub async fn play_preset(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        let Some(preset) = self.presets.iter().find(|preset| preset.id == id).cloned() else {
            self.notice = Notice::err("Unknown preset");
            return Err(Error::Rejected("Unknown preset".to_string()));
        };

        match api.spotify_play(Some(&preset.uri)).await {
            Ok(_) => {
                self.feed.send_modify(|status| {
                    status.playing = true;
                    status.paused = false;
                });
                self.phase = Phase::Active;
                self.notice = Notice::ok(format!("Playing {}", preset.name));
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed to play");
                Err(e)
            }
        }
    }

    /// Shows Spotify as not playing until the next poll says otherwise.
    pub fn reset_playback(&mut self) {
        self.feed.send_modify(|status| {
            if status.playing {
                status.playing = false;
                status.paused = true;
            }
        });
        if self.phase == Phase::Active {
            self.phase = Phase::Idle;
        }
    }
}

impl Drop for SpotifyPanel {
    fn drop(&mut self) {
        self.cancel_refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_playback_marks_paused() {
        let mut panel = SpotifyPanel::default();
        panel.feed().send_replace(SpotifyStatus {
            available: true,
            playing: true,
            ..Default::default()
        });
        panel.phase = Phase::Active;

        panel.reset_playback();

        let status = panel.status();
        assert!(!status.playing);
        assert!(status.paused);
        assert_eq!(panel.phase, Phase::Idle);
    }
}
