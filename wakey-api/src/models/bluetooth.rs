use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothDevice {
    pub mac: String,
    pub name: String,
    #[serde(default)]
    pub paired: bool,
    #[serde(default)]
    pub connected: bool,
    /// Sink volume percentage (0-100), known only for connected devices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u8>,
}

/// Reply of `GET /api/bluetooth/status`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothStatus {
    pub connected: bool,
    /// Devices currently connected
    #[serde(default)]
    pub devices: Vec<BluetoothDevice>,
}

/// Reply of `GET /api/bluetooth/volumes`, keyed by MAC address.
pub type BluetoothVolumes = HashMap<String, u8>;

/// Body of connect and disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacRequest {
    pub mac: String,
}

/// Body of `POST /api/bluetooth/volume`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceVolumeRequest {
    pub mac: String,
    pub volume: u8,
}
