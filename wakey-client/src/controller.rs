use std::sync::Arc;

use tokio::sync::watch;
use wakey_api::models::*;

use crate::api::ApiClient;
use crate::clock::{self, ClockDisplay};
use crate::error::Result;
use crate::settings::Client;
use crate::subscription::{LiveCount, Subscription};
use crate::views::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Main,
    Edit,
    Music,
    Lights,
    Settings,
    Bluetooth,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MusicTab {
    #[default]
    Radio,
    Spotify,
}

/// Owns every panel and the background pollers, and switches between views.
///
/// Clock and status polling run from [`start`](Self::start) until the
/// controller is dropped. Spotify polling runs only while its tab is visible.
pub struct ViewController {
    api: ApiClient,
    settings: Client,
    view: View,
    music_tab: MusicTab,
    live: LiveCount,

    clock_feed: Arc<watch::Sender<ClockDisplay>>,
    status_feed: Arc<watch::Sender<Option<AlarmRuntimeStatus>>>,
    clock_poller: Option<Subscription>,
    status_poller: Option<Subscription>,
    spotify_poller: Option<Subscription>,

    alarms: AlarmList,
    editor: AlarmEditor,
    radio: RadioPanel,
    spotify: SpotifyPanel,
    lights: LightsPanel,
    bluetooth: BluetoothPanel,
    bridge: SettingsPanel,
    notice: Notice,
}

impl ViewController {
    pub fn new(api: ApiClient, settings: Client) -> Self {
        Self {
            api,
            settings,
            view: View::Main,
            music_tab: MusicTab::Radio,
            live: LiveCount::new(),
            clock_feed: Arc::new(watch::Sender::new(ClockDisplay::now())),
            status_feed: Arc::new(watch::Sender::new(None)),
            clock_poller: None,
            status_poller: None,
            spotify_poller: None,
            alarms: AlarmList::default(),
            editor: AlarmEditor::default(),
            radio: RadioPanel::default(),
            spotify: SpotifyPanel::default(),
            lights: LightsPanel::default(),
            bluetooth: BluetoothPanel::default(),
            bridge: SettingsPanel::default(),
            notice: Notice::default(),
        }
    }

    /// Starts the clock and status pollers. Calling it again is a no-op.
    pub fn start(&mut self) {
        if self.clock_poller.is_none() {
            let feed = self.clock_feed.clone();
            self.clock_poller = Some(Subscription::every(
                "clock",
                self.settings.clock_interval(),
                &self.live,
                move || {
                    feed.send_replace(ClockDisplay::at(clock::local_now()));
                    async {}
                },
            ));
        }

        if self.status_poller.is_none() {
            let api = self.api.clone();
            let feed = self.status_feed.clone();
            self.status_poller = Some(Subscription::every(
                "status",
                self.settings.status_interval(),
                &self.live,
                move || {
                    let api = api.clone();
                    let feed = feed.clone();
                    async move { poll_status(&api, &feed).await }
                },
            ));
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn music_tab(&self) -> MusicTab {
        self.music_tab
    }

    /// Number of background pollers currently running.
    pub fn live_subscriptions(&self) -> usize {
        self.live.get()
    }

    pub fn spotify_polling(&self) -> bool {
        self.spotify_poller.is_some()
    }

    /// Switches to `view` and loads it. Only the poller owned by the view
    /// being left is released.
    pub async fn show(&mut self, view: View) -> Result<()> {
        if view != View::Music {
            self.release_spotify();
        }
        tracing::debug!("Showing {:?}", view);
        self.view = view;

        match view {
            View::Main => self.alarms.load(&self.api).await,
            View::Edit => self.editor.open_new(&self.api).await,
            View::Music => self.load_music().await,
            View::Lights => self.lights.load(&self.api).await,
            View::Settings => self.bridge.load(&self.api).await,
            View::Bluetooth => self.bluetooth.load(&self.api).await,
        }
    }

    pub async fn select_music_tab(&mut self, tab: MusicTab) -> Result<()> {
        self.music_tab = tab;
        if self.view == View::Music {
            self.load_music().await
        } else {
            Ok(())
        }
    }

    async fn load_music(&mut self) -> Result<()> {
        match self.music_tab {
            MusicTab::Radio => {
                self.release_spotify();
                self.radio.load(&self.api).await
            }
            MusicTab::Spotify => {
                let loaded = self.spotify.load(&self.api).await;
                self.acquire_spotify();
                loaded
            }
        }
    }

    /// Starts Spotify polling one period after entry; the panel load has
    /// just read the status.
    fn acquire_spotify(&mut self) {
        if self.spotify_poller.is_some() {
            return;
        }

        let api = self.api.clone();
        let feed = self.spotify.feed();
        self.spotify_poller = Some(Subscription::every_after(
            "spotify",
            self.settings.spotify_interval(),
            &self.live,
            move || {
                let api = api.clone();
                let feed = feed.clone();
                async move { SpotifyPanel::poll(&api, &feed).await }
            },
        ));
    }

    /// Stops the poller and any pending transport re-poll.
    fn release_spotify(&mut self) {
        self.spotify_poller = None;
        self.spotify.cancel_refresh();
    }

    // Clock and status

    pub fn clock(&self) -> ClockDisplay {
        self.clock_feed.borrow().clone()
    }

    pub fn subscribe_clock(&self) -> watch::Receiver<ClockDisplay> {
        self.clock_feed.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<Option<AlarmRuntimeStatus>> {
        self.status_feed.subscribe()
    }

    pub fn status(&self) -> Option<AlarmRuntimeStatus> {
        self.status_feed.borrow().clone()
    }

    pub fn status_view(&self) -> StatusView {
        StatusView::describe(self.status_feed.borrow().as_ref(), clock::local_now())
    }

    /// Polls the status once, outside the regular cadence.
    pub async fn refresh_status(&self) {
        poll_status(&self.api, &self.status_feed).await;
    }

    pub async fn dismiss(&mut self) -> Result<()> {
        let result = self.api.dismiss().await.map(|_| ());
        self.after_status_action(result, "Failed to dismiss").await
    }

    pub async fn snooze(&mut self) -> Result<()> {
        let result = self.api.snooze().await.map(|response| {
            if let Some(minutes) = response.snooze_minutes {
                tracing::info!("Snoozed for {} minutes", minutes);
            }
        });
        self.after_status_action(result, "Failed to snooze").await
    }

    async fn after_status_action(&mut self, result: Result<()>, fallback: &str) -> Result<()> {
        self.notice = match &result {
            Ok(()) => Notice::default(),
            Err(e) => Notice::failure(e, fallback),
        };
        self.refresh_status().await;
        result
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    // Alarms

    pub fn alarms(&self) -> &AlarmList {
        &self.alarms
    }

    pub fn editor(&self) -> &AlarmEditor {
        &self.editor
    }

    /// Form fields of the editor.
    pub fn form_mut(&mut self) -> &mut AlarmRequest {
        &mut self.editor.form
    }

    pub async fn toggle_alarm(&mut self, id: &str, enabled: bool) -> Result<()> {
        self.alarms.toggle(&self.api, id, enabled).await
    }

    pub async fn new_alarm(&mut self) -> Result<()> {
        self.show(View::Edit).await
    }

    pub async fn edit_alarm(&mut self, id: &str) -> Result<()> {
        self.release_spotify();
        self.view = View::Edit;
        self.editor.open_existing(&self.api, id).await
    }

    pub fn toggle_day(&mut self, day: u8) {
        self.editor.toggle_day(day);
    }

    pub async fn select_alarm_rooms(&mut self, rooms: Vec<Id>) {
        self.editor.select_rooms(&self.api, rooms).await;
    }

    /// Saves the editor and returns to the list.
    pub async fn save_alarm(&mut self) -> Result<()> {
        self.editor.save(&self.api).await?;
        self.show(View::Main).await
    }

    pub fn request_delete_alarm(&mut self) {
        self.editor.request_delete();
    }

    pub fn cancel_delete_alarm(&mut self) {
        self.editor.cancel_delete();
    }

    pub async fn confirm_delete_alarm(&mut self) -> Result<()> {
        if self.editor.confirm_delete(&self.api).await? {
            self.show(View::Main).await?;
        }
        Ok(())
    }

    // Radio

    pub fn radio(&self) -> &RadioPanel {
        &self.radio
    }

    pub async fn select_station(&mut self, id: &str) -> Result<()> {
        let was_playing = self.radio.playing;
        self.radio.select_station(&self.api, id).await?;
        if was_playing {
            self.spotify.reset_playback();
        }
        Ok(())
    }

    pub async fn play_radio(&mut self) -> Result<()> {
        self.radio.play(&self.api).await?;
        self.spotify.reset_playback();
        Ok(())
    }

    pub async fn stop_radio(&mut self) -> Result<()> {
        self.radio.stop(&self.api).await
    }

    pub async fn set_radio_volume(&mut self, volume: u8) -> Result<()> {
        self.radio.set_volume(&self.api, volume).await
    }

    // Spotify

    pub fn spotify(&self) -> &SpotifyPanel {
        &self.spotify
    }

    pub async fn spotify_play_pause(&mut self) -> Result<()> {
        let delay = self.settings.transport_refresh_delay();
        self.spotify.play_pause(&self.api, delay).await
    }

    pub async fn spotify_next(&mut self) -> Result<()> {
        let delay = self.settings.transport_refresh_delay();
        self.spotify.next(&self.api, delay).await
    }

    pub async fn spotify_previous(&mut self) -> Result<()> {
        let delay = self.settings.transport_refresh_delay();
        self.spotify.previous(&self.api, delay).await
    }

    pub async fn toggle_shuffle(&mut self) -> Result<()> {
        let delay = self.settings.transport_refresh_delay();
        self.spotify.toggle_shuffle(&self.api, delay).await
    }

    pub async fn toggle_repeat(&mut self) -> Result<()> {
        let delay = self.settings.transport_refresh_delay();
        self.spotify.toggle_repeat(&self.api, delay).await
    }

    pub async fn add_preset(&mut self, name: &str, uri: &str) -> Result<()> {
        self.spotify.add_preset(&self.api, name, uri).await
    }

    pub async fn delete_preset(&mut self, id: &str) -> Result<()> {
        self.spotify.delete_preset(&self.api, id).await
    }

    pub async fn play_preset(&mut self, id: &str) -> Result<()> {
        self.spotify.play_preset(&self.api, id).await?;
        self.radio.reset_playback();
        Ok(())
    }

    // Lights

    pub fn lights(&self) -> &LightsPanel {
        &self.lights
    }

    pub async fn sync_lights(&mut self) -> Result<()> {
        self.lights.sync(&self.api).await
    }

    pub async fn set_room_power(&mut self, room_id: &str, on: bool) -> Result<()> {
        self.lights.set_power(&self.api, room_id, on).await
    }

    pub async fn set_room_brightness(&mut self, room_id: &str, percent: u8) -> Result<()> {
        self.lights.set_brightness(&self.api, room_id, percent).await
    }

    pub async fn set_room_warmth(&mut self, room_id: &str, percent: u8) -> Result<()> {
        self.lights.set_warmth(&self.api, room_id, percent).await
    }

    pub async fn activate_scene(&mut self, room_id: &str, scene_id: &str) -> Result<()> {
        let settle = self.settings.scene_refresh_delay();
        self.lights
            .activate_scene(&self.api, room_id, scene_id, settle)
            .await
    }

    // Bluetooth

    pub fn bluetooth(&self) -> &BluetoothPanel {
        &self.bluetooth
    }

    pub async fn scan_bluetooth(&mut self) -> Result<()> {
        self.bluetooth.scan(&self.api).await
    }

    pub async fn connect_device(&mut self, mac: &str) -> Result<()> {
        self.bluetooth.connect(&self.api, mac).await
    }

    pub async fn disconnect_device(&mut self, mac: &str) -> Result<()> {
        self.bluetooth.disconnect(&self.api, mac).await
    }

    pub async fn set_device_volume(&mut self, mac: &str, volume: u8) -> Result<()> {
        self.bluetooth.set_volume(&self.api, mac, volume).await
    }

    pub async fn setup_combined_sink(&mut self) -> Result<()> {
        self.bluetooth.setup_combined(&self.api).await
    }

    // Settings

    pub fn bridge(&self) -> &SettingsPanel {
        &self.bridge
    }

    pub fn set_bridge_ip(&mut self, bridge_ip: &str) {
        self.bridge.bridge_ip = bridge_ip.to_string();
    }

    pub fn set_bridge_username(&mut self, username: &str) {
        self.bridge.username = username.to_string();
    }

    pub async fn save_bridge(&mut self) -> Result<()> {
        self.bridge.save(&self.api).await
    }

    pub async fn register_bridge(&mut self) -> Result<()> {
        self.bridge.register(&self.api).await
    }

    pub async fn test_bridge(&mut self) -> Result<bool> {
        self.bridge.test_connection(&self.api).await
    }

    pub async fn refresh_bridge_rooms(&mut self) -> Result<()> {
        self.bridge.load_rooms(&self.api).await
    }

    pub fn select_test_room(&mut self, room_id: &str) {
        self.bridge.select_room(room_id);
    }

    pub async fn test_light(&mut self) -> Result<()> {
        self.bridge.test_light(&self.api).await
    }
}

async fn poll_status(api: &ApiClient, feed: &watch::Sender<Option<AlarmRuntimeStatus>>) {
    match api.status().await {
        Ok(status) => {
            feed.send_replace(Some(status));
        }
        Err(e) => tracing::debug!("Status poll failed: {}", e),
    }
}
