use std::env;
use std::str::FromStr;

/// Deployment profile. Only `Development` may fall back to the built-in signing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Production,
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(ConfigError::InvalidProfile(other.to_string())),
        }
    }
}

/// API key/secret pair used to sign access tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKeys {
    pub api_key: String,
    pub api_secret: String,
}

impl SigningKeys {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Well-known keys of a local media server started in dev mode.
    /// INSECURE: never use outside local development.
    pub fn insecure_development() -> Self {
        Self::new("devkey", "secret")
    }

    pub fn is_insecure_development(&self) -> bool {
        *self == Self::insecure_development()
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Cross-origin policy applied to the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// No CORS headers, no OPTIONS route.
    None,
    /// `Access-Control-Allow-Origin: *` on every response.
    Open,
    /// Only the listed origins are echoed back.
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Parse `none` | `open` | `allow-list`, the latter with its comma separated origins.
    pub fn parse(policy: &str, allowed_origins: Option<&str>) -> Result<Self, ConfigError> {
        match policy.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CorsPolicy::None),
            "open" => Ok(CorsPolicy::Open),
            "allow-list" | "allowlist" => {
                let origins: Vec<String> = allowed_origins
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect();

                if origins.is_empty() {
                    return Err(ConfigError::EmptyAllowList);
                }
                Ok(CorsPolicy::AllowList(origins))
            }
            other => Err(ConfigError::InvalidCorsPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub profile: Profile,
    pub signing: SigningKeys,
    pub token_ttl_seconds: u64,
    pub cors: CorsPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let profile: Profile = env::var("APP_PROFILE")
            .unwrap_or_else(|_| "development".to_string())
            .parse()?;

        let signing = signing_keys(
            profile,
            env::var("LIVEKIT_API_KEY").ok(),
            env::var("LIVEKIT_API_SECRET").ok(),
        )?;

        let cors = CorsPolicy::parse(
            &env::var("CORS_POLICY").unwrap_or_else(|_| "open".to_string()),
            env::var("CORS_ALLOWED_ORIGINS").ok().as_deref(),
        )?;

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            profile,
            signing,
            token_ttl_seconds: env::var("TOKEN_TTL_SECONDS")
                .unwrap_or_else(|_| "21600".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidTokenTtl)?,
            cors,
        })
    }

    /// Local development configuration with the insecure built-in keys.
    pub fn development() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            profile: Profile::Development,
            signing: SigningKeys::insecure_development(),
            token_ttl_seconds: 21600,
            cors: CorsPolicy::Open,
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn signing_keys(
    profile: Profile,
    api_key: Option<String>,
    api_secret: Option<String>,
) -> Result<SigningKeys, ConfigError> {
    let api_key = api_key.filter(|k| !k.is_empty());
    let api_secret = api_secret.filter(|s| !s.is_empty());

    match (api_key, api_secret, profile) {
        (Some(key), Some(secret), _) => Ok(SigningKeys::new(key, secret)),
        (None, None, Profile::Development) => {
            tracing::warn!("LIVEKIT_API_KEY/LIVEKIT_API_SECRET unset, using insecure development keys");
            Ok(SigningKeys::insecure_development())
        }
        _ => Err(ConfigError::MissingSigningKeys),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid token TTL")]
    InvalidTokenTtl,
    #[error("Unknown profile: {0}")]
    InvalidProfile(String),
    #[error("LIVEKIT_API_KEY and LIVEKIT_API_SECRET are both required")]
    MissingSigningKeys,
    #[error("Unknown CORS policy: {0}")]
    InvalidCorsPolicy(String),
    #[error("CORS_ALLOWED_ORIGINS must list at least one origin")]
    EmptyAllowList,
}
