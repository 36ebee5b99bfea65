use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use wakey_api::models::*;

use crate::state::{Backend, MockState};

pub fn bluetooth_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/bluetooth/status", get(get_status))
        .route("/api/bluetooth/scan", post(scan))
        .route("/api/bluetooth/devices", get(get_devices))
        .route("/api/bluetooth/volumes", get(get_volumes))
        .route("/api/bluetooth/connect", post(connect))
        .route("/api/bluetooth/disconnect", post(disconnect))
        .route("/api/bluetooth/volume", post(set_volume))
        .route("/api/bluetooth/setup-combined", post(setup_combined))
        .with_state(state)
}

/// Connected first, then paired, then by name.
fn sorted_devices(backend: &Backend) -> Vec<BluetoothDevice> {
    let mut devices = backend.devices.clone();
    devices.sort_by(|a, b| {
        (!a.connected, !a.paired, &a.name).cmp(&(!b.connected, !b.paired, &b.name))
    });
    devices
}

pub async fn get_status(State(state): State<Arc<MockState>>) -> Json<BluetoothStatus> {
    let backend = state.backend.read().await;
    let devices: Vec<_> = sorted_devices(&backend)
        .into_iter()
        .filter(|device| device.connected)
        .collect();

    Json(BluetoothStatus {
        connected: !devices.is_empty(),
        devices,
    })
}

pub async fn scan(State(state): State<Arc<MockState>>) -> Json<Vec<BluetoothDevice>> {
    let mut backend = state.backend.write().await;

    let discovered = "AA:BB:CC:00:00:03";
    if !backend.devices.iter().any(|device| device.mac == discovered) {
        backend.devices.push(BluetoothDevice {
            mac: discovered.to_string(),
            name: "Portable speaker".to_string(),
            paired: false,
            connected: false,
            volume: None,
        });
    }

    Json(sorted_devices(&backend))
}

pub async fn get_devices(State(state): State<Arc<MockState>>) -> Json<Vec<BluetoothDevice>> {
    Json(sorted_devices(&*state.backend.read().await))
}

pub async fn get_volumes(State(state): State<Arc<MockState>>) -> Json<BluetoothVolumes> {
    let backend = state.backend.read().await;
    let volumes = backend
        .devices
        .iter()
        .filter(|device| device.connected)
        .filter_map(|device| device.volume.map(|volume| (device.mac.clone(), volume)))
        .collect();

    Json(volumes)
}

pub async fn connect(
    State(state): State<Arc<MockState>>,
    Json(body): Json<MacRequest>,
) -> Json<Ack> {
    if body.mac.is_empty() {
        return Json(Ack::failed("MAC address required"));
    }

    let mut backend = state.backend.write().await;
    let Some(device) = backend.devices.iter_mut().find(|device| device.mac == body.mac) else {
        return Json(Ack::failed("Connection failed: device not available"));
    };

    device.paired = true;
    device.connected = true;
    device.volume.get_or_insert(50);

    tracing::info!("Connected to {}", device.name);

    Json(Ack::ok())
}

pub async fn disconnect(
    State(state): State<Arc<MockState>>,
    Json(body): Json<MacRequest>,
) -> Json<Ack> {
    if body.mac.is_empty() {
        return Json(Ack::failed("MAC address required"));
    }

    let mut backend = state.backend.write().await;
    let Some(device) = backend.devices.iter_mut().find(|device| device.mac == body.mac) else {
        return Json(Ack::failed("Device not found"));
    };
    device.connected = false;

    if backend.devices.iter().filter(|device| device.connected).count() < 2 {
        backend.combined_sink = false;
    }

    Json(Ack::ok())
}

pub async fn set_volume(
    State(state): State<Arc<MockState>>,
    Json(body): Json<DeviceVolumeRequest>,
) -> Json<Ack> {
    let mut backend = state.backend.write().await;
    let Some(device) = backend
        .devices
        .iter_mut()
        .find(|device| device.mac == body.mac && device.connected)
    else {
        return Json(Ack::failed("Device not connected"));
    };

    device.volume = Some(body.volume.min(100));

    Json(Ack::ok())
}

pub async fn setup_combined(State(state): State<Arc<MockState>>) -> Json<Ack> {
    let mut backend = state.backend.write().await;

    if backend.devices.iter().filter(|device| device.connected).count() < 2 {
        return Json(Ack::failed("At least two connected speakers are required"));
    }
    backend.combined_sink = true;

    Json(Ack::ok())
}
