use async_trait::async_trait;

use crate::api::token::TOKEN_PATH;
use crate::client::error::SessionError;
use crate::models::{JoinRequest, TokenResponse};

/// Source of access tokens for a join attempt
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self, request: &JoinRequest) -> Result<String, SessionError>;
}

/// Requests tokens from a running token service over HTTP
#[derive(Clone)]
pub struct HttpTokenClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTokenClient {
    /// `base_url` is the service origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TokenSource for HttpTokenClient {
    async fn fetch_token(&self, request: &JoinRequest) -> Result<String, SessionError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SessionError::TokenTransport(e.to_string()))?;

        if !res.status().is_success() {
            tracing::warn!(status = %res.status(), "Token request rejected");
            return Err(SessionError::TokenRejected);
        }

        let body: TokenResponse = res
            .json()
            .await
            .map_err(|e| SessionError::TokenTransport(e.to_string()))?;

        Ok(body.token)
    }
}
