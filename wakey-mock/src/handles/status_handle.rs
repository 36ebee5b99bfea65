use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use wakey_api::models::*;

use crate::errors::MockError;
use crate::state::MockState;

pub fn status_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/dismiss", post(dismiss_alarm))
        .route("/api/snooze", post(snooze_alarm))
        .with_state(state)
}

pub async fn get_status(State(state): State<Arc<MockState>>) -> Json<AlarmRuntimeStatus> {
    Json(state.backend.read().await.status.clone())
}

pub async fn dismiss_alarm(State(state): State<Arc<MockState>>) -> Result<Json<Ack>, MockError> {
    let mut backend = state.backend.write().await;

    if backend.status.state == AlarmState::Idle {
        return Err(MockError::BadRequest("No active alarm".to_string()));
    }

    backend.status.state = AlarmState::Idle;
    backend.status.active_alarm_id = None;

    Ok(Json(Ack::ok()))
}

pub async fn snooze_alarm(
    State(state): State<Arc<MockState>>,
) -> Result<Json<SnoozeResponse>, MockError> {
    let mut backend = state.backend.write().await;

    if !matches!(backend.status.state, AlarmState::Active | AlarmState::Sunrise) {
        return Err(MockError::BadRequest("No active alarm to snooze".to_string()));
    }

    let snooze_minutes = backend
        .status
        .active_alarm_id
        .as_ref()
        .and_then(|id| backend.alarms.iter().find(|alarm| &alarm.id == id))
        .map(|alarm| alarm.snooze_minutes)
        .ok_or(MockError::NotFound("Active alarm"))?;

    backend.status.state = AlarmState::Snoozed;

    Ok(Json(SnoozeResponse {
        ok: true,
        snooze_minutes: Some(snooze_minutes),
    }))
}
