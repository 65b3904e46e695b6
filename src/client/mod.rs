//! Join-session client: form input, token request, room connection and teardown.
//!
//! The media transport itself is an external collaborator reached through
//! [`MediaClient`]; this module only drives its lifecycle.

pub mod conference;
pub mod config;
pub mod error;
pub mod form;
pub mod media;
pub mod session;
pub mod token_client;

pub use conference::{ConferenceView, ControlBar, CONFERENCE_TRACKS};
pub use config::{ClientConfig, DEFAULT_TOKEN_SERVICE_URL};
pub use error::{MediaError, SessionError};
pub use form::JoinForm;
pub use media::{MediaClient, RoomOptions, TrackQuery, TrackReference, TrackSource};
pub use session::{RoomScope, SessionClient, SessionPhase, SessionView, DEFAULT_SERVER_URL};
pub use token_client::{HttpTokenClient, TokenSource};
