use wakey_api::models::*;

use super::{Notice, Phase};
use crate::api::ApiClient;
use crate::error::{Error, Result};

/// Radio tab of the Music view.
#[derive(Debug)]
pub struct RadioPanel {
    pub phase: Phase,
    pub stations: Vec<Station>,
    /// Kept across view changes
    pub selected: Option<Id>,
    pub volume: u8,
    pub playing: bool,
    pub notice: Notice,
}

impl Default for RadioPanel {
    fn default() -> Self {
        Self {
            phase: Phase::Unloaded,
            stations: Vec::new(),
            selected: None,
            volume: 50,
            playing: false,
            notice: Notice::default(),
        }
    }
}

impl RadioPanel {
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.phase = Phase::Loading;

        let stations = match api.stations().await {
            Ok(stations) => stations,
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load stations");
                return Err(e);
            }
        };
        self.stations = stations;

        match api.radio_status().await {
            Ok(status) => {
                self.playing = status.playing;
                if status.playing && status.station.is_some() {
                    self.selected = status.station;
                }
            }
            Err(e) => tracing::debug!("Radio status unavailable: {}", e),
        }

        let known = self
            .selected
            .as_ref()
            .is_some_and(|id| self.stations.iter().any(|station| &station.id == id));
        if !known {
            self.selected = self.stations.first().map(|station| station.id.clone());
        }

        self.phase = Phase::from_active(self.playing);
        Ok(())
    }

    pub fn selected_station(&self) -> Option<&Station> {
        let id = self.selected.as_ref()?;
        self.stations.iter().find(|station| &station.id == id)
    }

    /// Selecting another station while playing switches to it at once.
    pub async fn select_station(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        self.selected = Some(id.to_string());

        if self.playing {
            self.play(api).await?;
        }
        Ok(())
    }

    pub async fn play(&mut self, api: &ApiClient) -> Result<()> {
        let Some(station) = self.selected.clone() else {
            self.notice = Notice::err("Select a station first");
            return Err(Error::Rejected("no station selected".to_string()));
        };
        self.notice = Notice::neutral("Starting...");

        match api.play_radio(&station, self.volume).await {
            Ok(ack) => {
                let name = ack
                    .station
                    .or_else(|| self.selected_station().map(|s| s.name.clone()))
                    .unwrap_or(station);
                self.playing = true;
                self.phase = Phase::Active;
                self.notice = Notice::ok(format!("Playing {name}"));
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed to play");
                Err(e)
            }
        }
    }

    pub async fn stop(&mut self, api: &ApiClient) -> Result<()> {
        match api.stop_radio().await {
            Ok(_) => {
                self.reset_playback();
                self.notice = Notice::neutral("Stopped");
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed");
                Err(e)
            }
        }
    }

    /// The new volume is only pushed to the speaker while playing.
    pub async fn set_volume(&mut self, api: &ApiClient, volume: u8) -> Result<()> {
        self.volume = volume.min(100);

        if self.playing {
            if let Err(e) = api.set_radio_volume(self.volume).await {
                self.notice = Notice::failure(&e, "Failed");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Shows the radio as stopped without asking the server.
    pub fn reset_playback(&mut self) {
        self.playing = false;
        if self.phase == Phase::Active {
            self.phase = Phase::Idle;
        }
    }
}
