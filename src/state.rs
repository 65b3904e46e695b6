use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let tokens = TokenService::new(&config.signing, config.token_ttl_seconds);
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}
