use crate::shared::entity::ID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantStatus {
    Registered,
    /// Any other stored status. Has no meaning for registration or capacity.
    Other(String),
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "registered",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for ParticipantStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "registered" => Self::Registered,
            _ => Self::Other(status),
        }
    }
}

/// A `User`s registration for a `Meeting`, keyed by meeting and user
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingParticipant {
    pub meeting_id: ID,
    pub user_id: ID,
    pub status: ParticipantStatus,
    pub registered_at: i64,
}

impl MeetingParticipant {
    pub fn registered(meeting_id: ID, user_id: ID, registered_at: i64) -> Self {
        Self {
            meeting_id,
            user_id,
            status: ParticipantStatus::Registered,
            registered_at,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.status == ParticipantStatus::Registered
    }
}
