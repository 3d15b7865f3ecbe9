use crate::error::BookclubError;
use crate::requirement::RequirementEngine;
use crate::shared::{
    auth::{protect_route, GroupAccess},
    usecase::{execute_with_access_guard, log_storage_error, GroupAccessBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookclub_api_structs::dtos::{
    MeetingDTO, MeetingParticipantDTO, MeetingRequirementDTO, RequirementStatusDTO,
};
use bookclub_api_structs::get_meeting::{APIResponse, PathParams};
use bookclub_domain::{
    Meeting, MeetingParticipant, MeetingRequirement, RequirementFulfillment, UnmetRequirement,
    ID,
};
use bookclub_infra::BookclubContext;

pub async fn get_meeting_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookclubContext>,
) -> Result<HttpResponse, BookclubError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetMeetingUseCase {
        user_id: user.id,
        group_id: path_params.group_id.clone(),
        meeting_id: path_params.meeting_id.clone(),
    };

    execute_with_access_guard(usecase, &ctx)
        .await
        .map(|res| {
            let requirement_status = res
                .requirement_status
                .iter()
                .map(|s| {
                    RequirementStatusDTO::new(
                        &s.requirement,
                        s.fulfillment.as_ref(),
                        s.unmet.as_ref(),
                    )
                })
                .collect();
            HttpResponse::Ok().json(APIResponse {
                meeting: MeetingDTO::new(res.meeting),
                creator_name: res.creator_name,
                requirements: res
                    .requirements
                    .into_iter()
                    .map(MeetingRequirementDTO::new)
                    .collect(),
                participants: res
                    .participants
                    .into_iter()
                    .map(|(participant, username)| {
                        MeetingParticipantDTO::new(participant, username)
                    })
                    .collect(),
                is_registered: res.is_registered,
                can_register: res.can_register,
                requirement_status,
            })
        })
        .map_err(BookclubError::from)
}

#[derive(Debug)]
pub struct GetMeetingUseCase {
    pub user_id: ID,
    pub group_id: ID,
    pub meeting_id: ID,
}

/// Where the requesting `User` stands on one requirement
#[derive(Debug)]
pub struct RequirementStatus {
    pub requirement: MeetingRequirement,
    pub fulfillment: Option<RequirementFulfillment>,
    pub unmet: Option<UnmetRequirement>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub meeting: Meeting,
    /// Username of the `User` that created the `Meeting`
    pub creator_name: Option<String>,
    pub requirements: Vec<MeetingRequirement>,
    /// Registered participants with their username
    pub participants: Vec<(MeetingParticipant, Option<String>)>,
    pub is_registered: bool,
    pub can_register: bool,
    pub requirement_status: Vec<RequirementStatus>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    GroupNotFound(ID),
    NotFound(ID),
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
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMeetingUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMeeting";

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

        let requirements = ctx
            .repos
            .meeting_requirements
            .find_by_meeting(&meeting.id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;

        let registered = ctx
            .repos
            .meeting_participants
            .find_registered(&meeting.id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;
        let user_ids = registered
            .iter()
            .map(|p| p.user_id.clone())
            .chain(std::iter::once(meeting.created_by.clone()))
            .collect::<Vec<_>>();
        let users = ctx
            .repos
            .users
            .find_many(&user_ids)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;

        let is_registered = registered.iter().any(|p| p.user_id == self.user_id);
        let can_register = meeting.accepts_registrations(
            ctx.sys.get_timestamp_millis(),
            registered.len() as i64,
        );

        // May store fulfillments for requirements the user has met since the last check
        let check = RequirementEngine::default()
            .evaluate_requirements(&requirements, &self.user_id, ctx)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;
        let fulfillments = ctx
            .repos
            .requirement_fulfillments
            .find_by_meeting_and_user(&meeting.id, &self.user_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;
        let requirement_status = requirements
            .iter()
            .map(|requirement| RequirementStatus {
                requirement: requirement.clone(),
                fulfillment: fulfillments
                    .iter()
                    .find(|f| f.requirement_id == requirement.id)
                    .cloned(),
                unmet: check.find_unmet(&requirement.id).cloned(),
            })
            .collect();

        let creator_name = users
            .iter()
            .find(|u| u.id == meeting.created_by)
            .map(|u| u.username.clone());
        let participants = registered
            .into_iter()
            .map(|participant| {
                let username = users
                    .iter()
                    .find(|u| u.id == participant.user_id)
                    .map(|u| u.username.clone());
                (participant, username)
            })
            .collect();

        Ok(UseCaseResponse {
            meeting,
            creator_name,
            requirements,
            participants,
            is_registered,
            can_register,
            requirement_status,
        })
    }
}

impl GroupAccessBoundary for GetMeetingUseCase {
    fn group_access(&self) -> GroupAccess {
        GroupAccess::member(self.user_id.clone(), self.group_id.clone())
    }
}
