use crate::models::JoinRequest;

/// Join form input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    pub room_id: String,
    pub username: String,
}

impl JoinForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_room_id(&mut self, value: impl Into<String>) {
        self.room_id = value.into();
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    /// The trimmed request, if both fields are non-blank
    pub fn submission(&self) -> Option<JoinRequest> {
        JoinRequest::new(self.room_id.trim(), self.username.trim())
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && self.submission().is_some()
    }

    pub fn submit_label(loading: bool) -> &'static str {
        if loading {
            "Joining..."
        } else {
            "Join Meeting"
        }
    }
}
