use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wakey_api::models::*;

use crate::error::{Error, Result};
use crate::settings::Client;

/// Typed access to every backend endpoint.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Client) -> Result<Self> {
        settings.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });

            tracing::debug!("Backend answered {}: {}", status, message);

            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Turns an `ok: false` reply into an error.
    fn accepted(ack: Ack) -> Result<Ack> {
        if ack.ok {
            Ok(ack)
        } else {
            Err(Error::Rejected(ack.error.unwrap_or_default()))
        }
    }

    async fn command<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Ack> {
        let ack: Ack = self.send(method, path, body).await?;
        Self::accepted(ack)
    }

    // Alarms

    pub async fn alarms(&self) -> Result<Vec<Alarm>> {
        self.get("/api/alarms").await
    }

    pub async fn alarm(&self, id: &str) -> Result<Alarm> {
        self.get(&format!("/api/alarms/{id}")).await
    }

    pub async fn create_alarm(&self, request: &AlarmRequest) -> Result<Alarm> {
        self.send(Method::POST, "/api/alarms", Some(request)).await
    }

    pub async fn update_alarm(&self, id: &str, update: &AlarmUpdate) -> Result<Alarm> {
        self.send(Method::PUT, &format!("/api/alarms/{id}"), Some(update))
            .await
    }

    pub async fn delete_alarm(&self, id: &str) -> Result<Ack> {
        self.command::<()>(Method::DELETE, &format!("/api/alarms/{id}"), None)
            .await
    }

    pub async fn stations(&self) -> Result<Vec<Station>> {
        self.get("/api/stations").await
    }

    // Runtime status

    pub async fn status(&self) -> Result<AlarmRuntimeStatus> {
        self.get("/api/status").await
    }

    pub async fn dismiss(&self) -> Result<Ack> {
        self.command::<()>(Method::POST, "/api/dismiss", None).await
    }

    pub async fn snooze(&self) -> Result<SnoozeResponse> {
        self.send::<(), _>(Method::POST, "/api/snooze", None).await
    }

    // Configuration and radio preview

    pub async fn config(&self) -> Result<AppConfig> {
        self.get("/api/config").await
    }

    pub async fn update_config(&self, update: &ConfigUpdate) -> Result<AppConfig> {
        self.send(Method::PUT, "/api/config", Some(update)).await
    }

    pub async fn play_radio(&self, station: &str, volume: u8) -> Result<Ack> {
        let body = PlayRadioRequest {
            station: station.to_string(),
            volume,
        };
        self.command(Method::POST, "/api/config/test-radio", Some(&body))
            .await
    }

    pub async fn stop_radio(&self) -> Result<Ack> {
        self.command::<()>(Method::POST, "/api/config/test-radio/stop", None)
            .await
    }

    pub async fn set_radio_volume(&self, volume: u8) -> Result<Ack> {
        self.command(
            Method::POST,
            "/api/config/test-radio/volume",
            Some(&VolumeRequest { volume }),
        )
        .await
    }

    pub async fn radio_status(&self) -> Result<RadioStatus> {
        self.get("/api/config/test-radio/status").await
    }

    // Hue

    pub async fn rooms(&self, with_state: bool) -> Result<Vec<HueRoom>> {
        let path = if with_state {
            "/api/hue/rooms?state=true"
        } else {
            "/api/hue/rooms"
        };
        self.get(path).await
    }

    pub async fn scenes(&self, room_id: &str) -> Result<Vec<HueScene>> {
        self.get(&format!("/api/hue/rooms/{room_id}/scenes")).await
    }

    pub async fn set_room_state(&self, room_id: &str, update: &RoomStateUpdate) -> Result<Ack> {
        self.command(
            Method::PUT,
            &format!("/api/hue/rooms/{room_id}/state"),
            Some(update),
        )
        .await
    }

    pub async fn activate_scene(&self, room_id: &str, scene_id: &str) -> Result<Ack> {
        let body = SceneRequest {
            scene: scene_id.to_string(),
        };
        self.command(
            Method::POST,
            &format!("/api/hue/rooms/{room_id}/scene"),
            Some(&body),
        )
        .await
    }

    pub async fn register_bridge(&self, bridge_ip: &str) -> Result<Ack> {
        let body = RegisterRequest {
            bridge_ip: bridge_ip.to_string(),
        };
        self.command(Method::POST, "/api/hue/register", Some(&body))
            .await
    }

    pub async fn bridge_status(&self) -> Result<HueBridgeStatus> {
        self.get("/api/hue/status").await
    }

    pub async fn test_light(&self, room_id: &str) -> Result<Ack> {
        let body = TestLightRequest {
            room_id: room_id.to_string(),
        };
        self.command(Method::POST, "/api/hue/test", Some(&body))
            .await
    }

    // Bluetooth

    pub async fn bluetooth_status(&self) -> Result<BluetoothStatus> {
        self.get("/api/bluetooth/status").await
    }

    pub async fn bluetooth_scan(&self) -> Result<Vec<BluetoothDevice>> {
        self.send::<(), _>(Method::POST, "/api/bluetooth/scan", None)
            .await
    }

    pub async fn bluetooth_devices(&self) -> Result<Vec<BluetoothDevice>> {
        self.get("/api/bluetooth/devices").await
    }

    pub async fn bluetooth_volumes(&self) -> Result<BluetoothVolumes> {
        self.get("/api/bluetooth/volumes").await
    }

    pub async fn bluetooth_connect(&self, mac: &str) -> Result<Ack> {
        let body = MacRequest {
            mac: mac.to_string(),
        };
        self.command(Method::POST, "/api/bluetooth/connect", Some(&body))
            .await
    }

    pub async fn bluetooth_disconnect(&self, mac: &str) -> Result<Ack> {
        let body = MacRequest {
            mac: mac.to_string(),
        };
        self.command(Method::POST, "/api/bluetooth/disconnect", Some(&body))
            .await
    }

    pub async fn set_device_volume(&self, mac: &str, volume: u8) -> Result<Ack> {
        let body = DeviceVolumeRequest {
            mac: mac.to_string(),
            volume,
        };
        self.command(Method::POST, "/api/bluetooth/volume", Some(&body))
            .await
    }

    pub async fn setup_combined_sink(&self) -> Result<Ack> {
        self.command::<()>(Method::POST, "/api/bluetooth/setup-combined", None)
            .await
    }

    // Spotify

    pub async fn spotify_status(&self) -> Result<SpotifyStatus> {
        self.get("/api/spotify/status").await
    }

    pub async fn spotify_presets(&self) -> Result<Vec<SpotifyPreset>> {
        self.get("/api/spotify/presets").await
    }

    pub async fn add_spotify_preset(&self, preset: &NewPreset) -> Result<SpotifyPreset> {
        self.send(Method::POST, "/api/spotify/presets", Some(preset))
            .await
    }

    pub async fn delete_spotify_preset(&self, id: &str) -> Result<Ack> {
        self.command::<()>(Method::DELETE, &format!("/api/spotify/presets/{id}"), None)
            .await
    }

    pub async fn spotify_play(&self, uri: Option<&str>) -> Result<Ack> {
        let body = SpotifyPlayRequest {
            uri: uri.map(str::to_string),
        };
        self.command(Method::POST, "/api/spotify/play", Some(&body))
            .await
    }

    pub async fn spotify_play_pause(&self) -> Result<Ack> {
        self.command::<()>(Method::POST, "/api/spotify/playpause", None)
            .await
    }

    pub async fn spotify_next(&self) -> Result<Ack> {
        self.command::<()>(Method::POST, "/api/spotify/next", None).await
    }

    pub async fn spotify_previous(&self) -> Result<Ack> {
        self.command::<()>(Method::POST, "/api/spotify/previous", None)
            .await
    }

    pub async fn spotify_shuffle(&self, enabled: bool) -> Result<Ack> {
        self.command(
            Method::POST,
            "/api/spotify/shuffle",
            Some(&EnabledRequest { enabled }),
        )
        .await
    }

    pub async fn spotify_repeat(&self, enabled: bool) -> Result<Ack> {
        self.command(
            Method::POST,
            "/api/spotify/repeat",
            Some(&EnabledRequest { enabled }),
        )
        .await
    }
}

/// Pulls a readable message out of an error body: `detail` first, then
/// `error`, which may itself be an object with a `message`.
fn error_message(body: &Value) -> Option<String> {
    for key in ["detail", "error"] {
        match body.get(key) {
            Some(Value::String(message)) => return Some(message.clone()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(message)) = inner.get("message") {
                    return Some(message.clone());
                }
            }
            _ => {}
        }
    }
    None
}
