use crate::error::BookclubError;
use crate::requirement::RequirementEngine;
use crate::shared::{
    auth::{protect_route, GroupAccess},
    usecase::{execute_with_access_guard, log_storage_error, GroupAccessBoundary, UseCase},
};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use bookclub_api_structs::dtos::MeetingParticipantDTO;
use bookclub_api_structs::register_for_meeting::{APIResponse, PathParams};
use bookclub_domain::{MeetingParticipant, User, ID};
use bookclub_infra::{BookclubContext, ParticipantInsertResult};
use tracing::info;

pub async fn register_for_meeting_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookclubContext>,
) -> Result<HttpResponse, BookclubError> {
    let user = protect_route(&http_req, &ctx).await?;
    let username = user.username.clone();

    let usecase = RegisterForMeetingUseCase {
        user,
        group_id: path_params.group_id.clone(),
        meeting_id: path_params.meeting_id.clone(),
    };

    execute_with_access_guard(usecase, &ctx)
        .await
        .map(|participant| {
            let location = format!(
                "/groups/{}/meetings/{}",
                path_params.group_id, participant.meeting_id
            );
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .json(APIResponse::new(MeetingParticipantDTO::new(
                    participant,
                    Some(username),
                )))
        })
        .map_err(BookclubError::from)
}

#[derive(Debug)]
pub struct RegisterForMeetingUseCase {
    pub user: User,
    pub group_id: ID,
    pub meeting_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    GroupNotFound(ID),
    NotFound(ID),
    MeetingAlreadyStarted,
    AlreadyRegistered,
    /// Describes every requirement that is not met
    RequirementsNotMet(Vec<String>),
    MeetingFull,
    StorageError,
}

impl From<UseCaseError> for BookclubError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::GroupNotFound(group_id) => Self::NotFound(format!(
                "The group with id: {}, was not found.",
                group_id
            )),
            UseCaseError::NotFound(meeting_id) => Self::NotFound(format!(
                "The meeting with id: {}, was not found.",
                meeting_id
            )),
            UseCaseError::MeetingAlreadyStarted => Self::BadClientData(
                "The meeting has already started, registration is closed.".into(),
            ),
            UseCaseError::AlreadyRegistered => {
                Self::Conflict("You are already registered for this meeting.".into())
            }
            UseCaseError::RequirementsNotMet(messages) => Self::BadClientData(messages.join("\n")),
            UseCaseError::MeetingFull => Self::BadClientData("The meeting is full.".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterForMeetingUseCase {
    type Response = MeetingParticipant;

    type Error = UseCaseError;

    const NAME: &'static str = "RegisterForMeeting";

    async fn execute(&mut self, ctx: &BookclubContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .groups
            .find(&self.group_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::GroupNotFound(self.group_id.clone()))?;

        let meeting = ctx
            .repos
            .meetings
            .find_in_group(&self.meeting_id, &self.group_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.meeting_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        if meeting.has_started(now) {
            return Err(UseCaseError::MeetingAlreadyStarted);
        }

        let existing = ctx
            .repos
            .meeting_participants
            .find(&meeting.id, &self.user.id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;
        if existing.is_some() {
            return Err(UseCaseError::AlreadyRegistered);
        }

        let check = RequirementEngine::default()
            .evaluate(&meeting.id, &self.user.id, ctx)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;
        if !check.satisfied() {
            return Err(UseCaseError::RequirementsNotMet(check.messages()));
        }

        if meeting.max_participants.is_some() {
            let registered = ctx
                .repos
                .meeting_participants
                .count_registered(&meeting.id)
                .await
                .inspect_err(log_storage_error)
                .map_err(|_| UseCaseError::StorageError)?;
            if meeting.is_full(registered) {
                return Err(UseCaseError::MeetingFull);
            }
        }

        // The count above may be stale by now, the insert checks capacity again
        let participant =
            MeetingParticipant::registered(meeting.id.clone(), self.user.id.clone(), now);
        let res = ctx
            .repos
            .meeting_participants
            .insert_within_capacity(&participant, meeting.max_participants)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;

        match res {
            ParticipantInsertResult::Inserted => {
                info!(
                    "User: {} registered for meeting: {}",
                    self.user.id, meeting.id
                );
                Ok(participant)
            }
            ParticipantInsertResult::Duplicate => Err(UseCaseError::AlreadyRegistered),
            ParticipantInsertResult::CapacityReached => Err(UseCaseError::MeetingFull),
        }
    }
}

impl GroupAccessBoundary for RegisterForMeetingUseCase {
    fn group_access(&self) -> GroupAccess {
        GroupAccess::member(self.user.id.clone(), self.group_id.clone())
    }
}
