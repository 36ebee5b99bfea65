use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;
use wakey_api::models::*;

use crate::errors::MockError;
use crate::state::MockState;

pub fn alarm_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/alarms", get(list_alarms).post(create_alarm))
        .route(
            "/api/alarms/:alarm_id",
            get(get_alarm).put(update_alarm).delete(delete_alarm),
        )
        .route("/api/stations", get(list_stations))
        .with_state(state)
}

fn validate_days(days: &[u8]) -> Result<(), MockError> {
    if days.iter().any(|day| *day > 6) {
        return Err(MockError::BadRequest("Day out of range".to_string()));
    }
    Ok(())
}

pub async fn list_alarms(State(state): State<Arc<MockState>>) -> Json<Vec<Alarm>> {
    Json(state.backend.read().await.alarms.clone())
}

pub async fn create_alarm(
    State(state): State<Arc<MockState>>,
    Json(body): Json<AlarmRequest>,
) -> Result<(StatusCode, Json<Alarm>), MockError> {
    validate_days(&body.days)?;

    let id = Uuid::new_v4().simple().to_string()[..8].to_string();
    let alarm = body.into_alarm(id);

    state.backend.write().await.alarms.push(alarm.clone());

    tracing::info!("Created alarm {} at {}", alarm.id, alarm.time);

    Ok((StatusCode::CREATED, Json(alarm)))
}

pub async fn get_alarm(
    State(state): State<Arc<MockState>>,
    Path(alarm_id): Path<String>,
) -> Result<Json<Alarm>, MockError> {
    let backend = state.backend.read().await;

    backend
        .alarms
        .iter()
        .find(|alarm| alarm.id == alarm_id)
        .cloned()
        .map(Json)
        .ok_or(MockError::NotFound("Alarm"))
}

pub async fn update_alarm(
    State(state): State<Arc<MockState>>,
    Path(alarm_id): Path<String>,
    Json(body): Json<AlarmUpdate>,
) -> Result<Json<Alarm>, MockError> {
    if let Some(days) = &body.days {
        validate_days(days)?;
    }

    let mut backend = state.backend.write().await;
    let alarm = backend
        .alarms
        .iter_mut()
        .find(|alarm| alarm.id == alarm_id)
        .ok_or(MockError::NotFound("Alarm"))?;

    body.apply(alarm);

    Ok(Json(alarm.clone()))
}

pub async fn delete_alarm(
    State(state): State<Arc<MockState>>,
    Path(alarm_id): Path<String>,
) -> Json<Ack> {
    state
        .backend
        .write()
        .await
        .alarms
        .retain(|alarm| alarm.id != alarm_id);

    Json(Ack::ok())
}

pub async fn list_stations(State(state): State<Arc<MockState>>) -> Json<Vec<Station>> {
    Json(state.backend.read().await.stations.clone())
}
