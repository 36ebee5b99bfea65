use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueBridgeConfig {
    /// Bridge address on the local network
    #[serde(default)]
    pub bridge_ip: String,
    /// API user issued by the bridge
    #[serde(default)]
    pub username: String,
}

impl HueBridgeConfig {
    pub fn is_configured(&self) -> bool {
        !self.bridge_ip.is_empty() && !self.username.is_empty()
    }
}

/// Global configuration stored next to the alarms.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub hue: HueBridgeConfig,
}

/// Body of `PUT /api/config`; absent sections are left alone.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<HueBridgeConfig>,
}
