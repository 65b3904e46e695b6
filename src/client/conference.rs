use crate::client::media::{MediaClient, TrackQuery, TrackReference, TrackSource};

/// Tracks shown in the participant grid: every camera (placeholder when off)
/// and screen shares only while published.
pub const CONFERENCE_TRACKS: [TrackQuery; 2] = [
    TrackQuery {
        source: TrackSource::Camera,
        with_placeholder: true,
    },
    TrackQuery {
        source: TrackSource::ScreenShare,
        with_placeholder: false,
    },
];

/// Local media toggles offered by the control bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBar {
    pub microphone: bool,
    pub camera: bool,
    pub screen_share: bool,
    pub leave: bool,
}

impl Default for ControlBar {
    fn default() -> Self {
        Self {
            microphone: true,
            camera: true,
            screen_share: true,
            leave: true,
        }
    }
}

/// Connected room surface: participant grid, room-wide audio and controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceView {
    pub tiles: Vec<TrackReference>,
    pub room_audio: bool,
    pub control_bar: ControlBar,
}

impl ConferenceView {
    /// Snapshot the grid from the media client's live track state.
    pub fn from_media<M: MediaClient + ?Sized>(media: &M) -> Self {
        let tiles = media
            .tracks(&CONFERENCE_TRACKS, false)
            .into_iter()
            .filter(|track| {
                CONFERENCE_TRACKS
                    .iter()
                    .any(|q| q.source == track.source && (q.with_placeholder || !track.is_placeholder()))
            })
            .collect();

        Self {
            tiles,
            room_audio: true,
            control_bar: ControlBar::default(),
        }
    }
}
