use wakey_api::models::*;

use super::{Notice, Phase};
use crate::api::ApiClient;
use crate::error::{Error, Result};

/// Hue bridge settings form.
#[derive(Debug, Default)]
pub struct SettingsPanel {
    pub phase: Phase,
    pub bridge_ip: String,
    pub username: String,
    pub notice: Notice,
    /// Rooms offered for the light test.
    pub rooms: Vec<HueRoom>,
    pub selected_room: Option<Id>,
    pub light_notice: Notice,
}

impl SettingsPanel {
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.phase = Phase::Loading;
        self.notice = Notice::default();

        match api.config().await {
            Ok(config) => {
                self.phase = Phase::from_active(config.hue.is_configured());
                self.bridge_ip = config.hue.bridge_ip;
                self.username = config.hue.username;
                if self.phase == Phase::Active {
                    let _ = self.load_rooms(api).await;
                }
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load settings");
                Err(e)
            }
        }
    }

    fn update(&self) -> ConfigUpdate {
        ConfigUpdate {
            hue: Some(HueBridgeConfig {
                bridge_ip: self.bridge_ip.trim().to_string(),
                username: self.username.trim().to_string(),
            }),
        }
    }

    pub async fn save(&mut self, api: &ApiClient) -> Result<()> {
        match api.update_config(&self.update()).await {
            Ok(config) => {
                self.phase = Phase::from_active(config.hue.is_configured());
                self.notice = Notice::ok("Saved!");
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed to save");
                Err(e)
            }
        }
    }

    /// Asks the bridge for a new API user. The link button on the bridge
    /// must have been pressed shortly before.
    pub async fn register(&mut self, api: &ApiClient) -> Result<()> {
        let bridge_ip = self.bridge_ip.trim().to_string();
        if bridge_ip.is_empty() {
            self.notice = Notice::err("Enter bridge IP first");
            return Err(Error::Rejected("Enter bridge IP first".to_string()));
        }
        self.notice =
            Notice::neutral("Registering... (press the bridge button now if you haven't)");

        match api.register_bridge(&bridge_ip).await {
            Ok(ack) => {
                if let Some(username) = ack.username {
                    self.username = username;
                }
                tracing::info!("Registered with Hue bridge at {}", bridge_ip);
                self.phase = Phase::Active;
                self.notice = Notice::ok("API key generated and saved!");
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Registration failed");
                Err(e)
            }
        }
    }

    /// Saves the form, then asks the backend whether the bridge answers.
    pub async fn test_connection(&mut self, api: &ApiClient) -> Result<bool> {
        self.notice = Notice::neutral("Testing...");
        if let Err(e) = api.update_config(&self.update()).await {
            self.notice = Notice::failure(&e, "Failed to save");
            return Err(e);
        }

        match api.bridge_status().await {
            Ok(status) if status.connected => {
                let name = status.name.unwrap_or_else(|| "bridge".to_string());
                self.phase = Phase::Active;
                self.notice = Notice::ok(format!("Connected to {name}"));
                let _ = self.load_rooms(api).await;
                Ok(true)
            }
            Ok(status) => {
                let reason = status.error.unwrap_or_else(|| "Unknown error".to_string());
                self.phase = Phase::Idle;
                self.notice = Notice::err(format!("Failed: {reason}"));
                Ok(false)
            }
            Err(e) => {
                let reason = e.server_message().unwrap_or("bridge unreachable");
                self.notice = Notice::err(format!("Failed: {reason}"));
                Err(e)
            }
        }
    }

    /// Refreshes the room picker. A selection that no longer exists is cleared.
    pub async fn load_rooms(&mut self, api: &ApiClient) -> Result<()> {
        match api.rooms(false).await {
            Ok(rooms) => {
                if let Some(id) = &self.selected_room {
                    if !rooms.iter().any(|room| &room.id == id) {
                        self.selected_room = None;
                    }
                }
                self.rooms = rooms;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Room list unavailable: {}", e);
                Err(e)
            }
        }
    }

    pub fn select_room<S: Into<Id>>(&mut self, room_id: S) {
        let room_id = room_id.into();
        self.selected_room = if room_id.is_empty() { None } else { Some(room_id) };
        self.light_notice = Notice::default();
    }

    /// Briefly flashes the selected room.
    pub async fn test_light(&mut self, api: &ApiClient) -> Result<()> {
        let Some(room_id) = self.selected_room.clone() else {
            self.light_notice = Notice::err("Select a room first");
            return Err(Error::Rejected("Select a room first".to_string()));
        };
        self.light_notice = Notice::neutral("Testing...");

        match api.test_light(&room_id).await {
            Ok(_) => {
                self.light_notice = Notice::ok("Light flashed!");
                Ok(())
            }
            Err(e) => {
                let reason = e.server_message().unwrap_or("Unknown error");
                self.light_notice = Notice::err(format!("Failed: {reason}"));
                Err(e)
            }
        }
    }
}
