use crate::base::{APIResponse, BaseClient};
use bookclub_api_structs::*;
use bookclub_domain::{LocationType, ID};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct MeetingClient {
    base: Arc<BaseClient>,
}

pub struct CreateMeetingInput {
    pub group_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location_type: LocationType,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub online_url: Option<String>,
    pub max_participants: Option<i64>,
    pub requirement_book_id: Option<ID>,
}

pub struct GetMeetingInput {
    pub group_id: ID,
    pub meeting_id: ID,
}

pub struct RegisterForMeetingInput {
    pub group_id: ID,
    pub meeting_id: ID,
}

impl MeetingClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateMeetingInput,
    ) -> APIResponse<create_meeting::APIResponse> {
        let body = create_meeting::RequestBody {
            title: input.title,
            description: input.description,
            start_time: input.start_time,
            end_time: input.end_time,
            location_type: input.location_type,
            location_name: input.location_name,
            location_address: input.location_address,
            online_url: input.online_url,
            max_participants: input.max_participants,
            requirement_book_id: input.requirement_book_id,
        };
        self.base
            .post(
                body,
                format!("groups/{}/meetings", input.group_id),
                StatusCode::SEE_OTHER,
            )
            .await
    }

    pub async fn get_by_group(
        &self,
        group_id: ID,
    ) -> APIResponse<get_group_meetings::APIResponse> {
        self.base
            .get(format!("groups/{}/meetings", group_id), StatusCode::OK)
            .await
    }

    pub async fn get(&self, input: GetMeetingInput) -> APIResponse<get_meeting::APIResponse> {
        self.base
            .get(
                format!("groups/{}/meetings/{}", input.group_id, input.meeting_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn register(
        &self,
        input: RegisterForMeetingInput,
    ) -> APIResponse<register_for_meeting::APIResponse> {
        self.base
            .post_empty(
                format!(
                    "groups/{}/meetings/{}/register",
                    input.group_id, input.meeting_id
                ),
                StatusCode::SEE_OTHER,
            )
            .await
    }
}
