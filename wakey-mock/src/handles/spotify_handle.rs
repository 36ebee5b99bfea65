use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use uuid::Uuid;
use wakey_api::models::*;

use crate::errors::MockError;
use crate::state::{Backend, MockState};

const TRACKS: [(&str, &str); 3] = [
    ("Here Comes the Sun", "The Beatles"),
    ("Morning Has Broken", "Cat Stevens"),
    ("Wake Me Up", "Avicii"),
];

pub fn spotify_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/spotify/status", get(get_status))
        .route("/api/spotify/presets", get(list_presets).post(create_preset))
        .route("/api/spotify/presets/:preset_id", delete(delete_preset))
        .route("/api/spotify/play", post(play))
        .route("/api/spotify/playpause", post(play_pause))
        .route("/api/spotify/next", post(next_track))
        .route("/api/spotify/previous", post(previous_track))
        .route("/api/spotify/shuffle", post(shuffle))
        .route("/api/spotify/repeat", post(repeat))
        .with_state(state)
}

fn current_track(backend: &Backend) -> usize {
    backend
        .spotify
        .track
        .as_deref()
        .and_then(|name| TRACKS.iter().position(|(track, _)| *track == name))
        .unwrap_or(0)
}

fn load_track(backend: &mut Backend, index: usize) {
    let (track, artist) = TRACKS[index % TRACKS.len()];
    backend.spotify.track = Some(track.to_string());
    backend.spotify.artist = Some(artist.to_string());
}

fn start_playback(backend: &mut Backend) {
    backend.spotify.playing = true;
    backend.spotify.paused = false;
    // Radio and Spotify share the speaker.
    backend.radio = RadioStatus::default();
}

pub async fn get_status(State(state): State<Arc<MockState>>) -> Json<SpotifyStatus> {
    Json(state.backend.read().await.spotify.clone())
}

pub async fn list_presets(State(state): State<Arc<MockState>>) -> Json<Vec<SpotifyPreset>> {
    Json(state.backend.read().await.presets.clone())
}

pub async fn create_preset(
    State(state): State<Arc<MockState>>,
    Json(body): Json<NewPreset>,
) -> Result<Json<SpotifyPreset>, MockError> {
    if body.name.trim().is_empty() || !body.uri.starts_with("spotify:") {
        return Err(MockError::BadRequest("Name and spotify: URI required".to_string()));
    }

    let preset = SpotifyPreset {
        id: Uuid::new_v4().simple().to_string()[..8].to_string(),
        name: body.name.trim().to_string(),
        uri: body.uri,
    };
    state.backend.write().await.presets.push(preset.clone());

    Ok(Json(preset))
}

pub async fn delete_preset(
    State(state): State<Arc<MockState>>,
    Path(preset_id): Path<String>,
) -> Json<Ack> {
    state
        .backend
        .write()
        .await
        .presets
        .retain(|preset| preset.id != preset_id);

    Json(Ack::ok())
}

pub async fn play(
    State(state): State<Arc<MockState>>,
    Json(body): Json<SpotifyPlayRequest>,
) -> Json<Ack> {
    let mut backend = state.backend.write().await;

    if !backend.spotify.available {
        return Json(Ack::failed("Spotify receiver unavailable"));
    }

    if body.uri.is_some() || backend.spotify.track.is_none() {
        load_track(&mut backend, 0);
    }
    start_playback(&mut backend);

    Json(Ack::ok())
}

pub async fn play_pause(State(state): State<Arc<MockState>>) -> Json<Ack> {
    let mut backend = state.backend.write().await;

    if backend.spotify.playing {
        backend.spotify.playing = false;
        backend.spotify.paused = true;
    } else {
        if backend.spotify.track.is_none() {
            load_track(&mut backend, 0);
        }
        start_playback(&mut backend);
    }

    Json(Ack::ok())
}

pub async fn next_track(State(state): State<Arc<MockState>>) -> Json<Ack> {
    let mut backend = state.backend.write().await;
    let index = current_track(&backend) + 1;
    load_track(&mut backend, index);
    Json(Ack::ok())
}

pub async fn previous_track(State(state): State<Arc<MockState>>) -> Json<Ack> {
    let mut backend = state.backend.write().await;
    let index = current_track(&backend) + TRACKS.len() - 1;
    load_track(&mut backend, index);
    Json(Ack::ok())
}

pub async fn shuffle(
    State(state): State<Arc<MockState>>,
    Json(body): Json<EnabledRequest>,
) -> Json<Ack> {
    state.backend.write().await.spotify.shuffle = body.enabled;
    Json(Ack::ok())
}

pub async fn repeat(
    State(state): State<Arc<MockState>>,
    Json(body): Json<EnabledRequest>,
) -> Json<Ack> {
    state.backend.write().await.spotify.repeat = body.enabled;
    Json(Ack::ok())
}
