use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),
}

impl MockError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        tracing::debug!("Rejecting request: {}", self);

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
