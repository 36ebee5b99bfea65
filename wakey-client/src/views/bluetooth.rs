use wakey_api::models::*;

use super::{Notice, Phase};
use crate::api::ApiClient;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct BluetoothPanel {
    pub phase: Phase,
    pub devices: Vec<BluetoothDevice>,
    /// Set for the duration of a scan; the scan control is disabled meanwhile
    pub scanning: bool,
    /// Speakers the audio output currently plays through
    pub output: BluetoothStatus,
    pub notice: Notice,
}

impl BluetoothPanel {
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.phase = Phase::Loading;

        match api.bluetooth_status().await {
            Ok(output) => self.output = output,
            Err(e) => tracing::debug!("No Bluetooth status: {}", e),
        }

        match api.bluetooth_devices().await {
            Ok(devices) => {
                self.set_devices(api, devices).await;
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                self.notice = Notice::failure(&e, "Failed to load devices");
                Err(e)
            }
        }
    }

    /// Stores the device list with the latest sink volumes merged in.
    async fn set_devices(&mut self, api: &ApiClient, mut devices: Vec<BluetoothDevice>) {
        match api.bluetooth_volumes().await {
            Ok(volumes) => {
                for device in &mut devices {
                    if let Some(volume) = volumes.get(&device.mac) {
                        device.volume = Some(*volume);
                    }
                }
            }
            Err(e) => tracing::debug!("No Bluetooth volumes: {}", e),
        }

        self.devices = devices;
        self.phase = Phase::from_active(self.connected_count() > 0);
    }

    /// Header line naming the speakers in use.
    pub fn output_label(&self) -> String {
        if !self.output.connected || self.output.devices.is_empty() {
            return "No speaker connected".to_string();
        }

        let names: Vec<_> = self
            .output
            .devices
            .iter()
            .map(|device| device.name.as_str())
            .collect();
        format!("Playing on {}", names.join(", "))
    }

    pub fn can_scan(&self) -> bool {
        !self.scanning
    }

    pub fn connected_count(&self) -> usize {
        self.devices.iter().filter(|device| device.connected).count()
    }

    /// Combined output only makes sense with more than one speaker.
    pub fn can_combine(&self) -> bool {
        self.connected_count() > 1
    }

    pub async fn scan(&mut self, api: &ApiClient) -> Result<()> {
        if self.scanning {
            return Ok(());
        }
        self.scanning = true;
        self.notice = Notice::neutral("Scanning...");

        let result = api.bluetooth_scan().await;
        self.scanning = false;

        match result {
            Ok(devices) => {
                self.notice = Notice::ok(format!("Found {} devices", devices.len()));
                self.set_devices(api, devices).await;
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Scan failed");
                Err(e)
            }
        }
    }

    pub async fn connect(&mut self, api: &ApiClient, mac: &str) -> Result<()> {
        self.notice = Notice::neutral("Connecting...");

        match api.bluetooth_connect(mac).await {
            Ok(_) => {
                self.notice = Notice::ok("Connected");
                self.load(api).await
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Connection failed");
                Err(e)
            }
        }
    }

    pub async fn disconnect(&mut self, api: &ApiClient, mac: &str) -> Result<()> {
        match api.bluetooth_disconnect(mac).await {
            Ok(_) => {
                self.notice = Notice::ok("Disconnected");
                self.load(api).await
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Disconnect failed");
                Err(e)
            }
        }
    }

    pub async fn set_volume(&mut self, api: &ApiClient, mac: &str, volume: u8) -> Result<()> {
        let volume = volume.min(100);
        if let Some(device) = self.devices.iter_mut().find(|device| device.mac == mac) {
            device.volume = Some(volume);
        }

        if let Err(e) = api.set_device_volume(mac, volume).await {
            self.notice = Notice::failure(&e, "Failed");
            return Err(e);
        }
        Ok(())
    }

    pub async fn setup_combined(&mut self, api: &ApiClient) -> Result<()> {
        if !self.can_combine() {
            self.notice = Notice::err("Connect at least two speakers first");
            return Err(Error::Rejected("not enough speakers".to_string()));
        }

        match api.setup_combined_sink().await {
            Ok(_) => {
                self.notice = Notice::ok("Combined output ready");
                Ok(())
            }
            Err(e) => {
                self.notice = Notice::failure(&e, "Setup failed");
                Err(e)
            }
        }
    }
}
