use std::time::Duration;

use livekit_api::access_token::{AccessToken, Claims, TokenVerifier, VideoGrants};

use crate::config::SigningKeys;
use crate::error::{AppError, Result};

/// Grants for an ordinary participant: join, publish and subscribe in `room` only.
pub fn participant_grants(room: &str) -> VideoGrants {
    VideoGrants {
        room: room.to_string(),
        room_join: true,
        can_publish: true,
        can_subscribe: true,
        ..Default::default()
    }
}

/// Signs and verifies room access tokens
#[derive(Clone)]
pub struct TokenService {
    keys: SigningKeys,
    ttl: Duration,
}

impl TokenService {
    pub fn new(keys: &SigningKeys, ttl_seconds: u64) -> Self {
        Self {
            keys: keys.clone(),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Issue a token that lets `identity` join, publish and subscribe in `room`.
    pub fn issue(&self, room: &str, identity: &str, name: &str) -> Result<String> {
        let token = AccessToken::with_api_key(&self.keys.api_key, &self.keys.api_secret)
            .with_identity(identity)
            .with_name(name)
            .with_ttl(self.ttl)
            .with_grants(participant_grants(room))
            .to_jwt()?;

        Ok(token)
    }

    /// Verify signature, issuer and validity window, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let claims = TokenVerifier::with_api_key(&self.keys.api_key, &self.keys.api_secret)
            .verify(token)
            .map_err(|e| AppError::InvalidToken(e.to_string()))?;

        if claims.iss != self.keys.api_key {
            return Err(AppError::InvalidToken("unexpected issuer".to_string()));
        }

        Ok(claims)
    }
}
