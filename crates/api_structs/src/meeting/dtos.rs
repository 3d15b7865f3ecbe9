use bookclub_domain::{
    Meeting, MeetingLocation, MeetingParticipant, MeetingRequirement, RequirementFulfillment,
    UnmetRequirement, ID,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDTO {
    pub id: ID,
    pub group_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub location: MeetingLocation,
    pub max_participants: Option<i64>,
    pub created_by: ID,
    pub created: i64,
}

impl MeetingDTO {
    pub fn new(meeting: Meeting) -> Self {
        Self {
            id: meeting.id,
            group_id: meeting.group_id,
            title: meeting.title,
            description: meeting.description,
            start_ts: meeting.start_ts,
            end_ts: meeting.end_ts,
            location: meeting.location,
            max_participants: meeting.max_participants,
            created_by: meeting.created_by,
            created: meeting.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequirementDTO {
    pub id: ID,
    pub requirement_type: String,
    pub requirement_data: Value,
    pub display_order: i32,
}

impl MeetingRequirementDTO {
    pub fn new(requirement: MeetingRequirement) -> Self {
        Self {
            id: requirement.id.clone(),
            requirement_type: requirement.requirement_type().to_string(),
            requirement_data: requirement.data.to_value(),
            display_order: requirement.display_order,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetingParticipantDTO {
    pub meeting_id: ID,
    pub user_id: ID,
    /// Missing when the `User` could not be found
    pub username: Option<String>,
    pub status: String,
    pub registered_at: i64,
}

impl MeetingParticipantDTO {
    pub fn new(participant: MeetingParticipant, username: Option<String>) -> Self {
        Self {
            meeting_id: participant.meeting_id,
            user_id: participant.user_id,
            username,
            status: participant.status.as_str().to_string(),
            registered_at: participant.registered_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummaryDTO {
    pub meeting: MeetingDTO,
    pub participant_count: i64,
    pub requirements: Vec<MeetingRequirementDTO>,
}

impl MeetingSummaryDTO {
    pub fn new(
        meeting: Meeting,
        participant_count: i64,
        requirements: Vec<MeetingRequirement>,
    ) -> Self {
        Self {
            meeting: MeetingDTO::new(meeting),
            participant_count,
            requirements: requirements
                .into_iter()
                .map(MeetingRequirementDTO::new)
                .collect(),
        }
    }
}

/// Whether the requesting `User` has fulfilled a requirement
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RequirementStatusDTO {
    pub requirement_id: ID,
    pub requirement_type: String,
    pub fulfilled: bool,
    pub fulfilled_at: Option<i64>,
    /// What is missing, only set when not fulfilled
    pub message: Option<String>,
}

impl RequirementStatusDTO {
    pub fn new(
        requirement: &MeetingRequirement,
        fulfillment: Option<&RequirementFulfillment>,
        unmet: Option<&UnmetRequirement>,
    ) -> Self {
        Self {
            requirement_id: requirement.id.clone(),
            requirement_type: requirement.requirement_type().to_string(),
            fulfilled: unmet.is_none(),
            fulfilled_at: fulfillment.map(|f| f.fulfilled_at),
            message: unmet.map(|u| u.message()),
        }
    }
}
