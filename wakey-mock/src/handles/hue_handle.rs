use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;
use wakey_api::models::*;

use crate::errors::MockError;
use crate::state::MockState;

pub fn hue_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/hue/rooms", get(get_rooms))
        .route("/api/hue/rooms/:room_id/scenes", get(get_scenes))
        .route("/api/hue/rooms/:room_id/state", put(update_room_state))
        .route("/api/hue/rooms/:room_id/scene", post(activate_scene))
        .route("/api/hue/register", post(register))
        .route("/api/hue/status", get(get_bridge_status))
        .route("/api/hue/test", post(test_light))
        .with_state(state)
}

pub async fn get_rooms(
    State(state): State<Arc<MockState>>,
    Query(query): Query<RoomsQuery>,
) -> Json<Vec<HueRoom>> {
    let backend = state.backend.read().await;

    // An unconfigured bridge has no rooms.
    if !backend.config.hue.is_configured() {
        return Json(Vec::new());
    }

    let rooms = backend
        .rooms
        .iter()
        .cloned()
        .map(|room| {
            if query.state {
                room
            } else {
                HueRoom {
                    on: None,
                    brightness: None,
                    color_temp: None,
                    ..room
                }
            }
        })
        .collect();

    Json(rooms)
}

pub async fn get_scenes(
    State(state): State<Arc<MockState>>,
    Path(room_id): Path<String>,
) -> Json<Vec<HueScene>> {
    let backend = state.backend.read().await;
    Json(backend.scenes.get(&room_id).cloned().unwrap_or_default())
}

pub async fn update_room_state(
    State(state): State<Arc<MockState>>,
    Path(room_id): Path<String>,
    Json(body): Json<RoomStateUpdate>,
) -> Result<Json<Ack>, MockError> {
    let mut backend = state.backend.write().await;
    let room = backend
        .rooms
        .iter_mut()
        .find(|room| room.id == room_id)
        .ok_or(MockError::NotFound("Room"))?;

    if let Some(on) = body.on {
        room.on = Some(on);
    }
    if let Some(brightness) = body.brightness {
        room.brightness = Some(brightness.min(254));
    }
    if let Some(color_temp) = body.color_temp {
        room.color_temp = Some(color_temp.clamp(153, 500));
    }

    Ok(Json(Ack::ok()))
}

pub async fn activate_scene(
    State(state): State<Arc<MockState>>,
    Path(room_id): Path<String>,
    Json(body): Json<SceneRequest>,
) -> Result<Json<Ack>, MockError> {
    let mut backend = state.backend.write().await;

    let known = backend
        .scenes
        .get(&room_id)
        .is_some_and(|scenes| scenes.iter().any(|scene| scene.id == body.scene));
    if !known {
        return Ok(Json(Ack::failed("Unknown scene")));
    }

    let room = backend
        .rooms
        .iter_mut()
        .find(|room| room.id == room_id)
        .ok_or(MockError::NotFound("Room"))?;
    room.on = Some(true);
    room.brightness = Some(200);
    room.color_temp = Some(250);

    Ok(Json(Ack::ok()))
}

pub async fn register(
    State(state): State<Arc<MockState>>,
    Json(body): Json<RegisterRequest>,
) -> Json<Ack> {
    let bridge_ip = body.bridge_ip.trim().to_string();
    if bridge_ip.is_empty() {
        return Json(Ack::failed("Bridge IP is required"));
    }

    let username = format!("wakey-{}", Uuid::new_v4().simple());
    state.backend.write().await.config.hue = HueBridgeConfig {
        bridge_ip,
        username: username.clone(),
    };

    Json(Ack {
        ok: true,
        username: Some(username),
        ..Default::default()
    })
}

pub async fn get_bridge_status(State(state): State<Arc<MockState>>) -> Json<HueBridgeStatus> {
    let backend = state.backend.read().await;

    if !backend.config.hue.is_configured() {
        return Json(HueBridgeStatus {
            connected: false,
            name: None,
            error: Some("Bridge IP or username not configured".to_string()),
        });
    }

    Json(HueBridgeStatus {
        connected: true,
        name: Some("Mock Bridge".to_string()),
        error: None,
    })
}

/// Flashes the room and leaves it off, like the real bridge test.
pub async fn test_light(
    State(state): State<Arc<MockState>>,
    Json(body): Json<TestLightRequest>,
) -> Json<Ack> {
    let mut backend = state.backend.write().await;

    if !backend.config.hue.is_configured() || body.room_id.is_empty() {
        return Json(Ack::failed("Hue not fully configured"));
    }

    let Some(room) = backend.rooms.iter_mut().find(|room| room.id == body.room_id) else {
        return Json(Ack::failed("Unknown room"));
    };
    room.on = Some(false);
    backend.flashes.push(body.room_id);

    Json(Ack::ok())
}
