use std::env;
use std::error::Error;
use std::fs;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mock {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub mock: Mock,
}

impl Settings {
    /// Loads the embedded defaults, or the file named by `WAKEY_CONFIG`.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let raw = match env::var("WAKEY_CONFIG") {
            Ok(path) => fs::read_to_string(path)?,
            Err(_) => include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../",
                "configs/default.toml"
            ))
            .to_string(),
        };

        Ok(toml::from_str(&raw)?)
    }
}
