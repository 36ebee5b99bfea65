use std::collections::HashMap;
use std::time::Duration;

use wakey_api::models::*;
use wakey_api::units;

use super::{Notice, Phase};
use crate::api::ApiClient;
use crate::error::Result;

/// A room as last reported by the bridge plus local edits not yet
/// confirmed by a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomControl {
    pub room: HueRoom,
    pub pending: RoomStateUpdate,
}

impl RoomControl {
    fn new(room: HueRoom) -> Self {
        Self {
            room,
            pending: RoomStateUpdate::default(),
        }
    }

    pub fn is_on(&self) -> bool {
        self.pending.on.or(self.room.on).unwrap_or(false)
    }

    pub fn brightness_percent(&self) -> u8 {
        self.pending
            .brightness
            .or(self.room.brightness)
            .map(units::brightness_to_percent)
            .unwrap_or(0)
    }

    pub fn warmth_percent(&self) -> u8 {
        self.pending
            .color_temp
            .or(self.room.color_temp)
            .map(units::mired_to_warmth)
            .unwrap_or(50)
    }
}

#[derive(Debug, Default)]
pub struct LightsPanel {
    pub phase: Phase,
    pub rooms: Vec<RoomControl>,
    /// Scenes per room id
    pub scenes: HashMap<Id, Vec<HueScene>>,
    pub notice: Notice,
}

impl LightsPanel {
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.phase = Phase::Loading;
        self.sync(api).await?;

        self.scenes.clear();
        for control in &self.rooms {
            match api.scenes(&control.room.id).await {
                Ok(scenes) => {
                    self.scenes.insert(control.room.id.clone(), scenes);
                }
                Err(e) => tracing::debug!("No scenes for room {}: {}", control.room.id, e),
            }
        }

        if self.rooms.is_empty() {
            self.notice = Notice::neutral("No rooms found. Set up the Hue bridge in Settings.");
        }
        Ok(())
    }

    /// Re-reads room state. The bridge's values replace any local edits.
    pub async fn sync(&mut self, api: &ApiClient) -> Result<()> {
        match api.rooms(true).await {
            Ok(rooms) => {
                self.rooms = rooms.into_iter().map(RoomControl::new).collect();
                let any_on = self.rooms.iter().any(RoomControl::is_on);
                self.phase = Phase::from_active(any_on);
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load rooms");
                Err(e)
            }
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&RoomControl> {
        self.rooms.iter().find(|control| control.room.id == room_id)
    }

    async fn push(
        &mut self,
        api: &ApiClient,
        room_id: &str,
        update: RoomStateUpdate,
    ) -> Result<()> {
        if let Some(control) = self.rooms.iter_mut().find(|control| control.room.id == room_id) {
            let pending = &mut control.pending;
            pending.on = update.on.or(pending.on);
            pending.brightness = update.brightness.or(pending.brightness);
            pending.color_temp = update.color_temp.or(pending.color_temp);
        }

        match api.set_room_state(room_id, &update).await {
            Ok(_) => {
                if self.rooms.iter().any(RoomControl::is_on) {
                    self.phase = Phase::Active;
                }
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed");
                Err(e)
            }
        }
    }

    pub async fn set_power(&mut self, api: &ApiClient, room_id: &str, on: bool) -> Result<()> {
        let update = RoomStateUpdate {
            on: Some(on),
            ..Default::default()
        };
        self.push(api, room_id, update).await
    }

    /// Turns the room on at the given percentage.
    pub async fn set_brightness(
        &mut self,
        api: &ApiClient,
        room_id: &str,
        percent: u8,
    ) -> Result<()> {
        let update = RoomStateUpdate {
            on: Some(true),
            brightness: Some(units::brightness_to_device(percent)),
            color_temp: None,
        };
        self.push(api, room_id, update).await
    }

    /// Turns the room on at the given warmth percentage.
    pub async fn set_warmth(&mut self, api: &ApiClient, room_id: &str, percent: u8) -> Result<()> {
        let update = RoomStateUpdate {
            on: Some(true),
            brightness: None,
            color_temp: Some(units::warmth_to_mired(percent)),
        };
        self.push(api, room_id, update).await
    }

    /// Recalls a scene, then re-reads the rooms once the bridge has applied it.
    pub async fn activate_scene(
        &mut self,
        api: &ApiClient,
        room_id: &str,
        scene_id: &str,
        settle: Duration,
    ) -> Result<()> {
        if let Err(e) = api.activate_scene(room_id, scene_id).await {
            self.notice = Notice::failure(&e, "Failed");
            return Err(e);
        }

        tokio::time::sleep(settle).await;
        self.sync(api).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(on: Option<bool>, brightness: Option<u8>) -> RoomControl {
        RoomControl::new(HueRoom {
            id: "1".to_string(),
            name: "Bedroom".to_string(),
            kind: None,
            on,
            brightness,
            color_temp: Some(327),
        })
    }

    #[test]
    fn test_pending_values_win_until_sync() {
        let mut control = room(Some(false), Some(254));
        assert!(!control.is_on());
        assert_eq!(control.brightness_percent(), 100);

        control.pending.on = Some(true);
        control.pending.brightness = Some(127);

        assert!(control.is_on());
        assert_eq!(control.brightness_percent(), 50);
        assert_eq!(control.warmth_percent(), 50);
    }

    #[test]
    fn test_room_without_state() {
        let control = room(None, None);

        assert!(!control.is_on());
        assert_eq!(control.brightness_percent(), 0);
    }
}
