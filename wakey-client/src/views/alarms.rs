use std::collections::BTreeSet;

use wakey_api::models::*;

use super::{Notice, Phase};
use crate::api::ApiClient;
use crate::error::Result;

/// Human label for a set of weekday numbers.
pub fn day_label(days: &[u8]) -> String {
    let set: BTreeSet<u8> = days.iter().copied().collect();

    if (0..7).all(|day| set.contains(&day)) {
        return "Every day".to_string();
    }
    if set.iter().eq(WEEKDAYS.iter()) {
        return "Weekdays".to_string();
    }
    if set.iter().eq(WEEKEND.iter()) {
        return "Weekends".to_string();
    }

    days.iter()
        .filter_map(|day| DAY_NAMES.get(*day as usize).copied())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Orders alarms by their "HH:MM" text.
pub fn sort_alarms(alarms: &mut [Alarm]) {
    alarms.sort_by(|a, b| a.time.cmp(&b.time));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRow {
    pub id: Id,
    pub time: String,
    /// "Label · Weekdays", or just the day label without a label
    pub info: String,
    pub enabled: bool,
}

impl From<&Alarm> for AlarmRow {
    fn from(alarm: &Alarm) -> Self {
        let days = day_label(&alarm.days);
        let info = if alarm.label.is_empty() {
            days
        } else {
            format!("{} · {}", alarm.label, days)
        };

        Self {
            id: alarm.id.clone(),
            time: alarm.time.clone(),
            info,
            enabled: alarm.enabled,
        }
    }
}

/// Alarm list on the main view.
#[derive(Debug, Default)]
pub struct AlarmList {
    pub phase: Phase,
    pub alarms: Vec<Alarm>,
    pub notice: Notice,
}

impl AlarmList {
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.phase = Phase::Loading;

        match api.alarms().await {
            Ok(mut alarms) => {
                sort_alarms(&mut alarms);
                let any_enabled = alarms.iter().any(|alarm| alarm.enabled);
                self.alarms = alarms;
                self.phase = Phase::from_active(any_enabled);
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load alarms");
                Err(e)
            }
        }
    }

    pub fn rows(&self) -> Vec<AlarmRow> {
        self.alarms.iter().map(AlarmRow::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// Flips the switch locally, sends the partial update and re-reads the
    /// list so the stored value wins.
    pub async fn toggle(&mut self, api: &ApiClient, id: &str, enabled: bool) -> Result<()> {
        if let Some(alarm) = self.alarms.iter_mut().find(|alarm| alarm.id == id) {
            alarm.enabled = enabled;
        }

        let sent = api.update_alarm(id, &AlarmUpdate::enabled(enabled)).await;
        if let Err(e) = &sent {
            self.notice = Notice::failure(e, "Failed");
        }

        let reloaded = self.load(api).await;
        sent?;
        reloaded
    }
}

/// Form behind the Edit view.
#[derive(Debug, Default)]
pub struct AlarmEditor {
    pub phase: Phase,
    /// Alarm being edited; `None` for a new one
    pub alarm_id: Option<Id>,
    pub form: AlarmRequest,
    pub stations: Vec<Station>,
    pub rooms: Vec<HueRoom>,
    pub scenes: Vec<HueScene>,
    pub notice: Notice,
    confirm_pending: bool,
}

impl AlarmEditor {
    pub fn title(&self) -> &'static str {
        if self.alarm_id.is_some() {
            "Edit Alarm"
        } else {
            "New Alarm"
        }
    }

    pub fn can_delete(&self) -> bool {
        self.alarm_id.is_some()
    }

    pub async fn open_new(&mut self, api: &ApiClient) -> Result<()> {
        *self = Self {
            phase: Phase::Loading,
            ..Default::default()
        };

        self.load_options(api).await;
        if self.form.audio.station.is_empty() {
            if let Some(first) = self.stations.first() {
                self.form.audio.station = first.id.clone();
            }
        }

        self.phase = Phase::Idle;
        Ok(())
    }

    pub async fn open_existing(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        *self = Self {
            phase: Phase::Loading,
            ..Default::default()
        };

        let alarm = match api.alarm(id).await {
            Ok(alarm) => alarm,
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load alarm");
                return Err(e);
            }
        };

        self.alarm_id = Some(alarm.id.clone());
        self.form = AlarmRequest::from(alarm);
        self.load_options(api).await;

        self.phase = Phase::Idle;
        Ok(())
    }

    /// Stations, rooms and the chosen room's scenes. Missing options only
    /// leave the pickers empty.
    async fn load_options(&mut self, api: &ApiClient) {
        match api.stations().await {
            Ok(stations) => self.stations = stations,
            Err(e) => tracing::debug!("No stations: {}", e),
        }
        match api.rooms(false).await {
            Ok(rooms) => self.rooms = rooms,
            Err(e) => tracing::debug!("No Hue rooms: {}", e),
        }
        self.refresh_scenes(api).await;
    }

    async fn refresh_scenes(&mut self, api: &ApiClient) {
        self.scenes.clear();

        let [room_id] = self.form.hue.rooms.as_slice() else {
            return;
        };
        match api.scenes(room_id).await {
            Ok(scenes) => self.scenes = scenes,
            Err(e) => tracing::debug!("No scenes for room {}: {}", room_id, e),
        }
    }

    pub fn toggle_day(&mut self, day: u8) {
        if day > 6 {
            return;
        }
        if let Some(index) = self.form.days.iter().position(|d| *d == day) {
            self.form.days.remove(index);
        } else {
            self.form.days.push(day);
            self.form.days.sort_unstable();
        }
    }

    /// Picks the rooms lit by the sunrise. Scenes are offered only for a
    /// single room; a scene that no longer applies is cleared.
    pub async fn select_rooms(&mut self, api: &ApiClient, rooms: Vec<Id>) {
        self.form.hue.rooms = rooms;
        self.refresh_scenes(api).await;

        let still_valid = self
            .form
            .hue
            .scene
            .as_ref()
            .is_some_and(|scene| self.scenes.iter().any(|s| &s.id == scene));
        if !still_valid {
            self.form.hue.scene = None;
        }
    }

    /// Creates or updates the alarm and returns the stored copy.
    pub async fn save(&mut self, api: &ApiClient) -> Result<Alarm> {
        self.notice = Notice::neutral("Saving...");

        let result = match &self.alarm_id {
            Some(id) => {
                let update = AlarmUpdate::from(self.form.clone());
                api.update_alarm(id, &update).await
            }
            None => api.create_alarm(&self.form).await,
        };

        match result {
            Ok(alarm) => {
                tracing::info!("Saved alarm {} at {}", alarm.id, alarm.time);
                self.alarm_id = Some(alarm.id.clone());
                self.notice = Notice::ok("Saved");
                Ok(alarm)
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed to save");
                Err(e)
            }
        }
    }

    pub fn request_delete(&mut self) {
        if self.can_delete() {
            self.confirm_pending = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_pending = false;
    }

    pub fn delete_pending(&self) -> bool {
        self.confirm_pending
    }

    /// Deletes the bound alarm if a delete was requested; returns whether a
    /// request went out.
    pub async fn confirm_delete(&mut self, api: &ApiClient) -> Result<bool> {
        let Some(id) = self.alarm_id.clone().filter(|_| self.confirm_pending) else {
            return Ok(false);
        };
        self.confirm_pending = false;

        match api.delete_alarm(&id).await {
            Ok(_) => {
                tracing::info!("Deleted alarm {}", id);
                self.alarm_id = None;
                Ok(true)
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Failed to delete");
                Err(e)
            }
        }
    }
}
