use std::collections::HashMap;

use tokio::sync::{Mutex, RwLock};
use wakey_api::models::*;

/// Everything the fake alarm server remembers between requests.
#[derive(Debug, Clone)]
pub struct Backend {
    pub alarms: Vec<Alarm>,
    pub status: AlarmRuntimeStatus,
    pub stations: Vec<Station>,
    pub config: AppConfig,
    pub radio: RadioStatus,
    pub radio_volume: u8,
    pub rooms: Vec<HueRoom>,
    pub scenes: HashMap<Id, Vec<HueScene>>,
    pub devices: Vec<BluetoothDevice>,
    pub combined_sink: bool,
    pub spotify: SpotifyStatus,
    pub presets: Vec<SpotifyPreset>,
    /// Rooms flashed by a light test, oldest first
    pub flashes: Vec<Id>,
}

impl Default for Backend {
    fn default() -> Self {
        let station = |id: &str, name: &str| Station {
            id: id.to_string(),
            name: name.to_string(),
        };
        let room = |id: &str, name: &str, on: bool, brightness: u8| HueRoom {
            id: id.to_string(),
            name: name.to_string(),
            kind: Some("Room".to_string()),
            on: Some(on),
            brightness: Some(brightness),
            color_temp: Some(366),
        };
        let scene = |id: &str, name: &str| HueScene {
            id: id.to_string(),
            name: name.to_string(),
        };
        let device = |mac: &str, name: &str, paired: bool| BluetoothDevice {
            mac: mac.to_string(),
            name: name.to_string(),
            paired,
            connected: false,
            volume: None,
        };

        Self {
            alarms: Vec::new(),
            status: AlarmRuntimeStatus::default(),
            stations: vec![
                station("npo_radio_1", "NPO Radio 1"),
                station("npo_radio_2", "NPO Radio 2"),
                station("npo_3fm", "NPO 3FM"),
                station("qmusic", "Qmusic"),
            ],
            config: AppConfig {
                hue: HueBridgeConfig {
                    bridge_ip: "192.168.1.20".to_string(),
                    username: "mock-user".to_string(),
                },
            },
            radio: RadioStatus::default(),
            radio_volume: 50,
            rooms: vec![room("1", "Bedroom", false, 0), room("2", "Living room", true, 254)],
            scenes: HashMap::from([
                (
                    "1".to_string(),
                    vec![scene("s-relax", "Relax"), scene("s-bright", "Bright")],
                ),
                ("2".to_string(), vec![scene("s-read", "Read")]),
            ]),
            devices: vec![
                device("AA:BB:CC:00:00:01", "Kitchen speaker", true),
                device("AA:BB:CC:00:00:02", "Bedroom speaker", true),
            ],
            combined_sink: false,
            spotify: SpotifyStatus {
                available: true,
                ..Default::default()
            },
            presets: Vec::new(),
            flashes: Vec::new(),
        }
    }
}

/// Shared handle passed to every route.
#[derive(Debug, Default)]
pub struct MockState {
    pub backend: RwLock<Backend>,
    hits: Mutex<HashMap<String, usize>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(backend: Backend) -> Self {
        Self {
            backend: RwLock::new(backend),
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub async fn record_hit(&self, path: &str) {
        let mut hits = self.hits.lock().await;
        *hits.entry(path.to_string()).or_insert(0) += 1;
    }

    /// Number of requests seen for an exact path.
    pub async fn hits(&self, path: &str) -> usize {
        let hits = self.hits.lock().await;
        hits.get(path).copied().unwrap_or(0)
    }

    pub async fn set_status(&self, status: AlarmRuntimeStatus) {
        self.backend.write().await.status = status;
    }

    pub async fn snapshot(&self) -> Backend {
        self.backend.read().await.clone()
    }
}
