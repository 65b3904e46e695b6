//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use roomgate::api::create_router;
use roomgate::client::{MediaClient, MediaError, RoomOptions, TrackQuery, TrackReference};
use roomgate::config::{Config, CorsPolicy};
use roomgate::state::AppState;
use tokio::net::TcpListener;

pub fn test_config(cors: CorsPolicy) -> Config {
    let mut config = Config::development();
    config.cors = cors;
    config
}

pub fn test_app(cors: CorsPolicy) -> Router {
    create_router(AppState::new(test_config(cors)))
}

/// Token service listening on an ephemeral local port
pub struct TestTokenServer {
    addr: std::net::SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestTokenServer {
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = test_app(CorsPolicy::Open);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, handle })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestTokenServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// In-memory media client recording connects and disconnects
#[derive(Default)]
pub struct RecordingMedia {
    pub connects: Mutex<Vec<(String, String)>>,
    pub disconnects: AtomicUsize,
    pub published: Mutex<Vec<TrackReference>>,
}

impl RecordingMedia {
    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    pub fn publish(&self, track: TrackReference) {
        if let Ok(mut published) = self.published.lock() {
            published.push(track);
        }
    }
}

#[async_trait]
impl MediaClient for RecordingMedia {
    async fn connect(
        &self,
        url: &str,
        token: &str,
        _options: &RoomOptions,
    ) -> Result<(), MediaError> {
        let mut connects = self
            .connects
            .lock()
            .map_err(|e| MediaError(e.to_string()))?;
        connects.push((url.to_string(), token.to_string()));
        Ok(())
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    fn tracks(&self, queries: &[TrackQuery], _only_subscribed: bool) -> Vec<TrackReference> {
        self.published
            .lock()
            .map(|published| {
                published
                    .iter()
                    .filter(|t| queries.iter().any(|q| q.source == t.source))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
