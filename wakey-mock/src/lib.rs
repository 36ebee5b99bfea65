use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::*;
use crate::settings::Settings;
use crate::state::MockState;

pub mod errors;
pub mod handles;
pub mod settings;
pub mod state;

async fn count_hits(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    state.record_hit(request.uri().path()).await;
    next.run(request).await
}

pub fn create_app(state: Arc<MockState>) -> Router {
    Router::new()
        .merge(alarm_router(state.clone()))
        .merge(status_router(state.clone()))
        .merge(config_router(state.clone()))
        .merge(hue_router(state.clone()))
        .merge(bluetooth_router(state.clone()))
        .merge(spotify_router(state.clone()))
        .layer(middleware::from_fn_with_state(state, count_hits))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// A mock backend serving on a local socket until dropped.
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(host: &str, port: u16, state: Arc<MockState>) -> io::Result<Self> {
        let listener = TcpListener::bind((host, port)).await?;
        let addr = listener.local_addr()?;
        let app = create_app(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock server stopped: {}", e);
            }
        });

        tracing::info!("listening on {:?}", addr);

        Ok(Self { addr, state, handle })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn run(settings: &Arc<Settings>) -> io::Result<()> {
    let state = Arc::new(MockState::new());

    let _server = MockServer::start(&settings.mock.host, settings.mock.port, state).await?;

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wakey_api::models::*;

    use super::*;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().uri(uri).method(method);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    #[tokio::test]
    async fn test_alarm_crud() {
        let state = Arc::new(MockState::new());
        let app = create_app(state.clone());

        let body = serde_json::to_value(AlarmRequest::default()).unwrap();
        let (status, created) = send(&app, Method::POST, "/api/alarms", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 8);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/alarms/{id}"),
            Some(json!({ "enabled": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["enabled"], json!(false));
        assert_eq!(updated["time"], json!("07:00"));

        let (status, _) = send(&app, Method::DELETE, &format!("/api/alarms/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &format!("/api/alarms/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], json!("Alarm not found"));
    }

    #[tokio::test]
    async fn test_dismiss_rejected_when_idle() {
        let app = create_app(Arc::new(MockState::new()));

        let (status, body) = send(&app, Method::POST, "/api/dismiss", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], json!("No active alarm"));
    }

    #[tokio::test]
    async fn test_rooms_hide_state_unless_requested() {
        let app = create_app(Arc::new(MockState::new()));

        let (_, plain) = send(&app, Method::GET, "/api/hue/rooms", None).await;
        let (_, full) = send(&app, Method::GET, "/api/hue/rooms?state=true", None).await;

        assert!(plain[0].get("brightness").is_none());
        assert!(full[0].get("brightness").is_some());
    }

    #[tokio::test]
    async fn test_light_flashes_known_room_only() {
        let state = Arc::new(MockState::new());
        let app = create_app(state.clone());

        let body = json!({ "room_id": "2" });
        let (_, ack) = send(&app, Method::POST, "/api/hue/test", Some(body)).await;
        assert_eq!(ack["ok"], json!(true));

        let body = json!({ "room_id": "9" });
        let (_, ack) = send(&app, Method::POST, "/api/hue/test", Some(body)).await;
        assert_eq!(ack["ok"], json!(false));
        assert_eq!(ack["error"], json!("Unknown room"));

        assert_eq!(state.snapshot().await.flashes, vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn test_radio_and_spotify_cancel_each_other() {
        let state = Arc::new(MockState::new());
        let app = create_app(state.clone());

        send(&app, Method::POST, "/api/spotify/play", Some(json!({}))).await;
        let (_, ack) = send(
            &app,
            Method::POST,
            "/api/config/test-radio",
            Some(json!({ "station": "npo_3fm", "volume": 40 })),
        )
        .await;
        assert_eq!(ack["station"], json!("NPO 3FM"));

        let backend = state.snapshot().await;
        assert!(backend.radio.playing);
        assert!(!backend.spotify.playing);
    }

    #[tokio::test]
    async fn test_hits_are_counted_per_path() {
        let state = Arc::new(MockState::new());
        let app = create_app(state.clone());

        send(&app, Method::GET, "/api/spotify/status", None).await;
        send(&app, Method::GET, "/api/spotify/status", None).await;

        assert_eq!(state.hits("/api/spotify/status").await, 2);
        assert_eq!(state.hits("/api/status").await, 0);
    }
}
