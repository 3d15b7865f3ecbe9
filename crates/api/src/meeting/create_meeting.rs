use crate::error::BookclubError;
use crate::shared::{
    auth::{protect_route, GroupAccess},
    usecase::{execute_with_access_guard, log_storage_error, GroupAccessBoundary, UseCase},
};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use bookclub_api_structs::create_meeting::{APIResponse, PathParams, RequestBody};
use bookclub_domain::{Meeting, MeetingLocation, MeetingRequirement, ID};
use bookclub_infra::BookclubContext;
use tracing::info;

pub async fn create_meeting_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookclubContext>,
) -> Result<HttpResponse, BookclubError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateMeetingUseCase {
        user_id: user.id,
        group_id: path_params.group_id.clone(),
        title: body.title,
        description: body.description,
        start_ts: body.start_time.timestamp_millis(),
        end_ts: body.end_time.timestamp_millis(),
        location: MeetingLocation::new(
            body.location_type,
            body.location_name,
            body.location_address,
            body.online_url,
        ),
        max_participants: body.max_participants,
        requirement_book_id: body.requirement_book_id,
    };

    execute_with_access_guard(usecase, &ctx)
        .await
        .map(|meeting| {
            HttpResponse::SeeOther()
                .insert_header((
                    header::LOCATION,
                    format!("/groups/{}/meetings", meeting.group_id),
                ))
                .json(APIResponse::new(meeting))
        })
        .map_err(BookclubError::from)
}

#[derive(Debug)]
pub struct CreateMeetingUseCase {
    pub user_id: ID,
    pub group_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub location: MeetingLocation,
    pub max_participants: Option<i64>,
    /// `Book` participants have to review before they can register
    pub requirement_book_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    GroupNotFound(ID),
    InvalidTimeRange,
    InvalidCapacity(i64),
    InvalidRequirement(ID),
    StorageError,
}

impl From<UseCaseError> for BookclubError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::GroupNotFound(group_id) => Self::NotFound(format!(
                "The group with id: {}, was not found.",
                group_id
            )),
            UseCaseError::InvalidTimeRange => {
                Self::BadClientData("The meeting has to end after it starts".into())
            }
            UseCaseError::InvalidCapacity(max) => Self::BadClientData(format!(
                "Invalid max participants: {}, it has to be at least 1",
                max
            )),
            UseCaseError::InvalidRequirement(book_id) => Self::BadClientData(format!(
                "The required book with id: {}, was not found.",
                book_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMeetingUseCase {
    type Response = Meeting;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateMeeting";

    async fn execute(&mut self, ctx: &BookclubContext) -> Result<Self::Response, Self::Error> {
        let group = ctx
            .repos
            .groups
            .find(&self.group_id)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::GroupNotFound(self.group_id.clone()))?;

        if !Meeting::is_valid_time_range(self.start_ts, self.end_ts) {
            return Err(UseCaseError::InvalidTimeRange);
        }
        if !Meeting::is_valid_capacity(self.max_participants) {
            return Err(UseCaseError::InvalidCapacity(
                self.max_participants.unwrap_or_default(),
            ));
        }

        let book = match &self.requirement_book_id {
            Some(book_id) => match ctx.repos.books.find(book_id).await {
                Ok(Some(book)) => Some(book),
                Ok(None) => return Err(UseCaseError::InvalidRequirement(book_id.clone())),
                Err(e) => {
                    log_storage_error(&e);
                    return Err(UseCaseError::StorageError);
                }
            },
            None => None,
        };

        let now = ctx.sys.get_timestamp_millis();
        let meeting = Meeting {
            id: Default::default(),
            group_id: group.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            location: self.location.clone(),
            max_participants: self.max_participants,
            created_by: self.user_id.clone(),
            created: now,
            updated: now,
        };
        let requirements = book
            .map(|book| {
                vec![MeetingRequirement::book_review(
                    meeting.id.clone(),
                    &book,
                    group.id.clone(),
                )]
            })
            .unwrap_or_default();

        ctx.repos
            .meetings
            .insert(&meeting, &requirements)
            .await
            .inspect_err(log_storage_error)
            .map_err(|_| UseCaseError::StorageError)?;

        info!(
            "Meeting: {} created in group: {} with {} requirement(s)",
            meeting.id,
            group.id,
            requirements.len()
        );

        Ok(meeting)
    }
}

impl GroupAccessBoundary for CreateMeetingUseCase {
    fn group_access(&self) -> GroupAccess {
        GroupAccess::admin(self.user_id.clone(), self.group_id.clone())
    }
}
