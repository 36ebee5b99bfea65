use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure: connection refused, timeout, broken body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx reply; the message comes from the body when it has one
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered `ok: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn config<S: fmt::Display>(message: S) -> Self {
        Error::Config(message.to_string())
    }

    /// Text the server gave for the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Status { message, .. } | Error::Rejected(message) if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_server_errors() {
        let status = Error::Status {
            status: 400,
            message: "No active alarm".to_string(),
        };
        let rejected = Error::Rejected("Unknown station".to_string());
        let silent = Error::Rejected(String::new());
        let config = Error::config("missing base_url");

        assert_eq!(status.server_message(), Some("No active alarm"));
        assert_eq!(rejected.server_message(), Some("Unknown station"));
        assert_eq!(silent.server_message(), None);
        assert_eq!(config.server_message(), None);
    }
}
