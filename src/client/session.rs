use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::client::conference::ConferenceView;
use crate::client::config::ClientConfig;
use crate::client::error::{MediaError, SessionError};
use crate::client::form::JoinForm;
use crate::client::media::{MediaClient, RoomOptions};
use crate::client::token_client::{HttpTokenClient, TokenSource};
use crate::models::JoinRequest;

/// Media server used when none is configured
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:7880";

/// Where a session is in its join lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    FormEntry,
    Requesting,
    Connecting,
    Connected,
    Error(String),
}

impl SessionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Requesting | SessionPhase::Connecting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What the client should currently render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// Join form, with the error banner when the last attempt failed
    Join {
        loading: bool,
        error: Option<String>,
    },
    Conference(ConferenceView),
}

/// One room connection. Disconnects exactly once, on [`RoomScope::release`] or drop.
pub struct RoomScope<M: MediaClient + ?Sized> {
    media: Arc<M>,
    released: AtomicBool,
}

impl<M: MediaClient + ?Sized> RoomScope<M> {
    fn new(media: Arc<M>) -> Self {
        Self {
            media,
            released: AtomicBool::new(false),
        }
    }

    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.media.disconnect();
            tracing::debug!("Room connection released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl<M: MediaClient + ?Sized> Drop for RoomScope<M> {
    fn drop(&mut self) {
        self.release();
    }
}

struct SessionState<M: MediaClient + ?Sized> {
    phase: SessionPhase,
    token: Option<String>,
    scope: Option<Arc<RoomScope<M>>>,
    attempt: CancellationToken,
}

/// Drives form -> token request -> connect -> connected, and tears the
/// connection down when superseded or unmounted.
///
/// Every join runs under a child of the mount token. A newer join cancels the
/// older one, and a cancelled attempt never touches session state again.
pub struct SessionClient<T: TokenSource, M: MediaClient + ?Sized> {
    tokens: T,
    media: Arc<M>,
    server_url: String,
    options: RoomOptions,
    mounted: CancellationToken,
    state: RwLock<SessionState<M>>,
}

impl<T: TokenSource, M: MediaClient + ?Sized> SessionClient<T, M> {
    pub fn new(tokens: T, media: Arc<M>, server_url: impl Into<String>) -> Self {
        let mounted = CancellationToken::new();
        let attempt = mounted.child_token();

        Self {
            tokens,
            media,
            server_url: server_url.into(),
            options: RoomOptions::default(),
            mounted,
            state: RwLock::new(SessionState {
                phase: SessionPhase::FormEntry,
                token: None,
                scope: None,
                attempt,
            }),
        }
    }

    pub fn with_options(mut self, options: RoomOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.phase.is_loading()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_cancelled()
    }

    /// The form while there is no token, the conference surface once there is.
    pub async fn view(&self) -> SessionView {
        let state = self.state.read().await;
        match (&state.token, &state.phase) {
            (Some(_), SessionPhase::Connecting | SessionPhase::Connected) => {
                SessionView::Conference(ConferenceView::from_media(self.media.as_ref()))
            }
            (_, phase) => SessionView::Join {
                loading: phase.is_loading(),
                error: phase.error().map(str::to_string),
            },
        }
    }

    /// Submit the form. Refused while a join is in flight or a field is blank.
    pub async fn submit(&self, form: &JoinForm) -> Result<(), SessionError> {
        if self.is_loading().await {
            return Err(SessionError::InProgress);
        }
        let request = form.submission().ok_or(SessionError::Validation)?;
        self.join(request).await
    }

    /// Request a token for `request` and connect with it.
    pub async fn join(&self, request: JoinRequest) -> Result<(), SessionError> {
        let attempt = {
            let mut state = self.state.write().await;
            if self.mounted.is_cancelled() {
                return Err(SessionError::Cancelled);
            }

            state.attempt.cancel();
            state.attempt = self.mounted.child_token();
            // A new token replaces the old connection
            if let Some(scope) = state.scope.take() {
                scope.release();
            }
            state.token = None;
            state.phase = SessionPhase::Requesting;
            state.attempt.clone()
        };

        tracing::info!(
            room_id = %request.room_id,
            username = %request.username,
            "Requesting access token"
        );

        let fetched = tokio::select! {
            _ = attempt.cancelled() => return Err(SessionError::Cancelled),
            result = self.tokens.fetch_token(&request) => result,
        };

        let token = match fetched {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Token request failed");
                self.update(&attempt, |state| {
                    state.phase = SessionPhase::Error(e.to_string());
                })
                .await
                .ok_or(SessionError::Cancelled)?;
                return Err(e);
            }
        };

        let media = self.media.clone();
        let scope = self
            .update(&attempt, |state| {
                let scope = Arc::new(RoomScope::new(media));
                state.token = Some(token.clone());
                state.scope = Some(scope.clone());
                state.phase = SessionPhase::Connecting;
                scope
            })
            .await
            .ok_or(SessionError::Cancelled)?;

        let connected = self.connect_scope(&attempt, &token).await?;

        match connected {
            Ok(()) => {
                self.update(&attempt, |state| {
                    state.phase = SessionPhase::Connected;
                })
                .await
                .ok_or(SessionError::Cancelled)?;

                tracing::info!(room_id = %request.room_id, "Connected to room");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(room_id = %request.room_id, error = %e, "Failed to connect to room");
                self.update(&attempt, |state| {
                    scope.release();
                    state.scope = None;
                    state.token = None;
                    state.phase = SessionPhase::Error("Failed to connect to room".to_string());
                })
                .await
                .ok_or(SessionError::Cancelled)?;

                Err(SessionError::Connection(e.to_string()))
            }
        }
    }

    /// Connect for `attempt`. A cancelled attempt's scope is already released,
    /// so it must not connect at all.
    async fn connect_scope(
        &self,
        attempt: &CancellationToken,
        token: &str,
    ) -> Result<Result<(), MediaError>, SessionError> {
        if attempt.is_cancelled() {
            tracing::debug!("Join attempt cancelled before connecting");
            return Err(SessionError::Cancelled);
        }
        Ok(self
            .media
            .connect(&self.server_url, token, &self.options)
            .await)
    }

    /// Tear the session down. Pending attempts are cancelled and the current
    /// connection, if any, is released. Idempotent.
    pub async fn unmount(&self) {
        let mut state = self.state.write().await;
        self.mounted.cancel();
        if let Some(scope) = state.scope.take() {
            scope.release();
        }
        tracing::debug!("Session unmounted");
    }

    /// Apply `f` unless `attempt` has been cancelled.
    async fn update<R>(
        &self,
        attempt: &CancellationToken,
        f: impl FnOnce(&mut SessionState<M>) -> R,
    ) -> Option<R> {
        let mut state = self.state.write().await;
        if attempt.is_cancelled() {
            tracing::debug!("Dropping update from cancelled join attempt");
            return None;
        }
        Some(f(&mut state))
    }
}

impl<M: MediaClient + ?Sized> SessionClient<HttpTokenClient, M> {
    /// Client that requests tokens from `config.token_service_url` and
    /// connects to `config.media_server_url`.
    pub fn from_config(config: &ClientConfig, media: Arc<M>) -> Self {
        Self::new(
            HttpTokenClient::new(&config.token_service_url),
            media,
            config.media_server_url.clone(),
        )
    }
}

impl<T: TokenSource, M: MediaClient + ?Sized> Drop for SessionClient<T, M> {
    fn drop(&mut self) {
        self.mounted.cancel();
        if let Some(scope) = self.state.get_mut().scope.take() {
            scope.release();
        }
    }
}
