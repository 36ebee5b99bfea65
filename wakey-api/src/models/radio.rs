use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: Id,
    pub name: String,
}

/// Body of `POST /api/config/test-radio`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRadioRequest {
    pub station: Id,
    pub volume: u8,
}

/// Reply of `GET /api/config/test-radio/status`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioStatus {
    pub playing: bool,
    #[serde(default)]
    pub station: Option<Id>,
}
