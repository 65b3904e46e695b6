use async_trait::async_trait;

use crate::client::error::MediaError;

/// Where a track comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackSource {
    Camera,
    Microphone,
    ScreenShare,
    ScreenShareAudio,
}

/// Selects tracks of one source. With `with_placeholder`, participants that
/// have not published that source still get an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackQuery {
    pub source: TrackSource,
    pub with_placeholder: bool,
}

/// A published track, or a placeholder when `track_sid` is `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReference {
    pub participant: String,
    pub source: TrackSource,
    pub track_sid: Option<String>,
}

impl TrackReference {
    pub fn published(participant: &str, source: TrackSource, track_sid: &str) -> Self {
        Self {
            participant: participant.to_string(),
            source,
            track_sid: Some(track_sid.to_string()),
        }
    }

    pub fn placeholder(participant: &str, source: TrackSource) -> Self {
        Self {
            participant: participant.to_string(),
            source,
            track_sid: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.track_sid.is_none()
    }
}

/// Room tuning passed through to the media client on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomOptions {
    /// Size video to each subscriber's viewport
    pub adaptive_stream: bool,
    /// Pause publishing layers nobody subscribes to
    pub dynacast: bool,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            adaptive_stream: true,
            dynacast: true,
        }
    }
}

/// Real-time media client. Transport, negotiation and routing live behind this trait.
#[async_trait]
pub trait MediaClient: Send + Sync {
    /// Connect to the media server at `url`, authenticating with `token`.
    async fn connect(&self, url: &str, token: &str, options: &RoomOptions)
        -> Result<(), MediaError>;

    /// Leave the room and release its resources. Also aborts a pending connect.
    fn disconnect(&self);

    /// Live tracks matching `queries`.
    fn tracks(&self, queries: &[TrackQuery], only_subscribed: bool) -> Vec<TrackReference>;
}
