use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use wakey_api::models::*;

use crate::state::MockState;

pub fn config_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/config", get(get_config).put(update_config))
        .route("/api/config/test-radio", post(play_radio))
        .route("/api/config/test-radio/stop", post(stop_radio))
        .route("/api/config/test-radio/volume", post(set_radio_volume))
        .route("/api/config/test-radio/status", get(radio_status))
        .with_state(state)
}

pub async fn get_config(State(state): State<Arc<MockState>>) -> Json<AppConfig> {
    Json(state.backend.read().await.config.clone())
}

pub async fn update_config(
    State(state): State<Arc<MockState>>,
    Json(body): Json<ConfigUpdate>,
) -> Json<AppConfig> {
    let mut backend = state.backend.write().await;

    if let Some(hue) = body.hue {
        backend.config.hue = hue;
    }

    Json(backend.config.clone())
}

pub async fn play_radio(
    State(state): State<Arc<MockState>>,
    Json(body): Json<PlayRadioRequest>,
) -> Json<Ack> {
    let mut backend = state.backend.write().await;

    let Some(name) = backend
        .stations
        .iter()
        .find(|station| station.id == body.station)
        .map(|station| station.name.clone())
    else {
        return Json(Ack::failed("Unknown station"));
    };

    backend.radio = RadioStatus {
        playing: true,
        station: Some(body.station),
    };
    backend.radio_volume = body.volume.min(100);
    // Radio and Spotify share the speaker.
    backend.spotify.playing = false;
    backend.spotify.paused = true;

    tracing::info!("Playing {}", name);

    Json(Ack {
        ok: true,
        station: Some(name),
        ..Default::default()
    })
}

pub async fn stop_radio(State(state): State<Arc<MockState>>) -> Json<Ack> {
    state.backend.write().await.radio = RadioStatus::default();
    Json(Ack::ok())
}

pub async fn set_radio_volume(
    State(state): State<Arc<MockState>>,
    Json(body): Json<VolumeRequest>,
) -> Json<Ack> {
    state.backend.write().await.radio_volume = body.volume.min(100);
    Json(Ack::ok())
}

pub async fn radio_status(State(state): State<Arc<MockState>>) -> Json<RadioStatus> {
    Json(state.backend.read().await.radio.clone())
}
