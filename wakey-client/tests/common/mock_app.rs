use std::sync::Arc;
use std::time::Duration;

use wakey_api::models::*;
use wakey_client::api::ApiClient;
use wakey_client::controller::ViewController;
use wakey_client::settings::Client;
use wakey_mock::MockServer;
use wakey_mock::state::{Backend, MockState};

/// A controller wired to a mock backend on an ephemeral port.
pub struct MockApp {
    pub server: MockServer,
    pub api: ApiClient,
    pub controller: ViewController,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_backend(Backend::default()).await
    }

    pub async fn with_backend(backend: Backend) -> Self {
        let state = Arc::new(MockState::with_backend(backend));
        let server = MockServer::start("127.0.0.1", 0, state).await.unwrap();

        let settings = fast_settings(&server.base_url());
        let api = ApiClient::new(&settings).unwrap();
        let controller = ViewController::new(api.clone(), settings);

        Self {
            server,
            api,
            controller,
        }
    }

    pub fn state(&self) -> &Arc<MockState> {
        &self.server.state
    }

    pub async fn hits(&self, path: &str) -> usize {
        self.server.state.hits(path).await
    }

    pub async fn backend(&self) -> Backend {
        self.server.state.snapshot().await
    }

    pub async fn create_alarm(&self, time: &str, label: &str, days: &[u8]) -> Alarm {
        let request = AlarmRequest {
            time: time.to_string(),
            label: label.to_string(),
            days: days.to_vec(),
            ..Default::default()
        };
        self.api.create_alarm(&request).await.unwrap()
    }
}

pub fn fast_settings(base_url: &str) -> Client {
    Client {
        base_url: base_url.to_string(),
        request_timeout_ms: Some(2_000),
        clock_interval_ms: 50,
        status_interval_ms: 50,
        spotify_interval_ms: 30,
        scene_refresh_delay_ms: 20,
        transport_refresh_delay_ms: 20,
    }
}

pub async fn settle(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
