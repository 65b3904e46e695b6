use serde::{Deserialize, Serialize};

/// Raw body of `POST /api/token`. Fields are optional so that a missing
/// value is reported as a validation failure rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenRequestBody {
    pub room_id: Option<String>,
    pub username: Option<String>,
}

impl TokenRequestBody {
    pub fn into_join_request(self) -> Option<JoinRequest> {
        JoinRequest::new(self.room_id?, self.username?)
    }
}

/// A request to join `room_id` as `username`. Both values are non-blank;
/// they are kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub room_id: String,
    pub username: String,
}

impl JoinRequest {
    pub fn new(room_id: impl Into<String>, username: impl Into<String>) -> Option<Self> {
        let room_id = room_id.into();
        let username = username.into();

        if room_id.trim().is_empty() || username.trim().is_empty() {
            return None;
        }

        Some(Self { room_id, username })
    }
}

/// Successful response of `POST /api/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body shared by every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
