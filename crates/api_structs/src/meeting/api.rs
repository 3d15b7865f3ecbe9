use crate::dtos::{
    MeetingDTO, MeetingParticipantDTO, MeetingRequirementDTO, MeetingSummaryDTO,
    RequirementStatusDTO,
};
use bookclub_domain::{LocationType, Meeting, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResponse {
    pub meeting: MeetingDTO,
}

impl MeetingResponse {
    pub fn new(meeting: Meeting) -> Self {
        Self {
            meeting: MeetingDTO::new(meeting),
        }
    }
}

pub mod create_meeting {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Deserialize)]
    pub struct PathParams {
        pub group_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        pub start_time: DateTime<Utc>,
        pub end_time: DateTime<Utc>,
        pub location_type: LocationType,
        #[serde(default)]
        pub location_name: Option<String>,
        #[serde(default)]
        pub location_address: Option<String>,
        #[serde(default)]
        pub online_url: Option<String>,
        #[serde(default)]
        pub max_participants: Option<i64>,
        /// When set, participants have to review this `Book` in the group before registering
        #[serde(default)]
        pub requirement_book_id: Option<ID>,
    }

    pub type APIResponse = MeetingResponse;
}

pub mod get_group_meetings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub group_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub meetings: Vec<MeetingSummaryDTO>,
        /// Whether the requesting `User` can create meetings in the group
        pub is_admin: bool,
    }

    impl APIResponse {
        pub fn new(meetings: Vec<MeetingSummaryDTO>, is_admin: bool) -> Self {
            Self { meetings, is_admin }
        }
    }
}

pub mod get_meeting {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub group_id: ID,
        pub meeting_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub meeting: MeetingDTO,
        /// Username of the admin that created the meeting
        pub creator_name: Option<String>,
        pub requirements: Vec<MeetingRequirementDTO>,
        pub participants: Vec<MeetingParticipantDTO>,
        pub is_registered: bool,
        pub can_register: bool,
        pub requirement_status: Vec<RequirementStatusDTO>,
    }
}

pub mod register_for_meeting {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub group_id: ID,
        pub meeting_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub participant: MeetingParticipantDTO,
    }

    impl APIResponse {
        pub fn new(participant: MeetingParticipantDTO) -> Self {
            Self { participant }
        }
    }
}
