use std::env;

use crate::client::session::DEFAULT_SERVER_URL;

/// Token service URL used when none is configured
pub const DEFAULT_TOKEN_SERVICE_URL: &str = "http://localhost:3000";

/// Where a join-session client fetches tokens and which media server it connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token_service_url: String,
    pub media_server_url: String,
}

impl ClientConfig {
    pub fn new(token_service_url: impl Into<String>) -> Self {
        Self {
            token_service_url: token_service_url.into(),
            media_server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }

    pub fn with_media_server_url(mut self, url: impl Into<String>) -> Self {
        self.media_server_url = url.into();
        self
    }

    /// Read `TOKEN_SERVICE_URL` and `LIVEKIT_URL`, falling back to the local defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_values(
            env::var("TOKEN_SERVICE_URL").ok(),
            env::var("LIVEKIT_URL").ok(),
        )
    }

    fn from_values(token_service_url: Option<String>, media_server_url: Option<String>) -> Self {
        let config = Self::new(
            token_service_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_SERVICE_URL.to_string()),
        );

        match media_server_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_media_server_url(url),
            None => config,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_SERVICE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_servers() {
        let config = ClientConfig::from_values(None, Some(String::new()));
        assert_eq!(config.token_service_url, "http://localhost:3000");
        assert_eq!(config.media_server_url, "ws://localhost:7880");
    }

    #[test]
    fn test_configured_urls_win() {
        let config = ClientConfig::from_values(
            Some("http://10.0.0.2:8080".into()),
            Some("wss://media.example.test".into()),
        );
        assert_eq!(config.token_service_url, "http://10.0.0.2:8080");
        assert_eq!(config.media_server_url, "wss://media.example.test");
    }
}
