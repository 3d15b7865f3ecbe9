use crate::error::BookclubError;
use crate::shared::{
    auth::{protect_route, GroupAccess},
    usecase::{execute_with_access_guard, log_storage_error, GroupAccessBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookclub_api_structs::dtos::MeetingSummaryDTO;
use bookclub_api_structs::get_group_meetings::{APIResponse, PathParams};
use bookclub_domain::{Meeting, MeetingRequirement, ID};
use bookclub_infra::BookclubContext;

pub async fn get_group_meetings_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookclubContext>,
) -> Result<HttpResponse, BookclubError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetGroupMeetingsUseCase {
        user_id: user.id,
        group_id: path_params.group_id.clone(),
    };

    execute_with_access_guard(usecase, &ctx)
        .await
        .map(|res| {
            let meetings = res
                .meetings
                .into_iter()
                .map(|m| MeetingSummaryDTO::new(m.meeting, m.participant_count, m.requirements))
                .collect();
            HttpResponse::Ok().json(APIResponse::new(meetings, res.is_admin))
        })
        .map_err(BookclubError::from)
}

#[derive(Debug)]
pub struct GetGroupMeetingsUseCase {
    pub user_id: ID,
    pub group_id: ID,
}

#[derive(Debug)]
pub struct MeetingSummary {
    pub meeting: Meeting,
    /// Amount of `registered` participants
    pub participant_count: i64,
    pub requirements: Vec<MeetingRequirement>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub meetings: Vec<MeetingSummary>,
    pub is_admin: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    GroupNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for BookclubError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::GroupNotFound(group_id) => Self::NotFound(format!(
                "The group with id: {}, was not found.",
                group_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetGroupMeetingsUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetGroupMeetings";

    async fn execute(&mut self, ctx: &BookclubContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .groups
            .find(&self.group_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::GroupNotFound(self.group_id.clone()))?;
        let is_admin = ctx
            .repos
            .groups
            .is_admin(&self.group_id, &self.user_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;

        let meetings = ctx
            .repos
            .meetings
            .find_by_group(&self.group_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;

        let mut summaries = Vec::with_capacity(meetings.len());
        for meeting in meetings {
            let participant_count = ctx
                .repos
                .meeting_participants
                .count_registered(&meeting.id)
                .await
                .inspect_err(log_storage_error)
                .map_err(|_| UseCaseError::StorageError)?;
            let requirements = ctx
                .repos
                .meeting_requirements
                .find_by_meeting(&meeting.id)
                .await
                .inspect_err(log_storage_error)
                .map_err(|_| UseCaseError::StorageError)?;

            summaries.push(MeetingSummary {
                meeting,
                participant_count,
                requirements,
            });
        }

        Ok(UseCaseResponse {
            meetings: summaries,
            is_admin,
        })
    }
}

impl GroupAccessBoundary for GetGroupMeetingsUseCase {
    fn group_access(&self) -> GroupAccess {
        GroupAccess::member(self.user_id.clone(), self.group_id.clone())
    }
}
