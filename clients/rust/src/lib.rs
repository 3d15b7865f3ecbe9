mod base;
mod meeting;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use bookclub_api_structs::dtos::*;
pub use bookclub_domain::{LocationType, MeetingLocation, ID};
use meeting::MeetingClient;
pub use meeting::{CreateMeetingInput, GetMeetingInput, RegisterForMeetingInput};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use bookclub_api_structs::dtos::MeetingDTO as Meeting;
pub use bookclub_api_structs::dtos::MeetingParticipantDTO as MeetingParticipant;
pub use bookclub_api_structs::dtos::MeetingRequirementDTO as MeetingRequirement;

/// Bookclub Server SDK
///
/// The SDK contains methods for interacting with the Bookclub server
/// API. Requests are made on behalf of the `User` owning the auth token.
#[derive(Clone)]
pub struct BookclubSDK {
    pub meeting: MeetingClient,
    pub status: StatusClient,
}

impl BookclubSDK {
    pub fn new(address: String, auth_token: Option<String>) -> Self {
        let mut base = BaseClient::new(address);
        if let Some(auth_token) = auth_token {
            base.set_auth_token(auth_token);
        }
        let base = Arc::new(base);
        let meeting = MeetingClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { meeting, status }
    }
}
