/// Failures of a join attempt, all recoverable by submitting the form again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("roomId and username are required")]
    Validation,

    /// A join is already requesting or connecting
    #[error("A join is already in progress")]
    InProgress,

    #[error("Failed to join meeting")]
    TokenRejected,

    /// The token request never produced a response
    #[error("{0}")]
    TokenTransport(String),

    #[error("Failed to connect to room")]
    Connection(String),

    /// Superseded by a newer join, or the session was unmounted
    #[error("Join attempt cancelled")]
    Cancelled,
}

/// Error reported by the external media client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MediaError(pub String);
