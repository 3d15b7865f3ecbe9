mod book;
mod group;
mod meeting;
mod meeting_participant;
mod meeting_requirement;
mod requirement_fulfillment;
mod review;
mod shared;
mod user;

pub use book::IBookRepo;
use book::{InMemoryBookRepo, PostgresBookRepo};
pub use group::IGroupRepo;
use group::{InMemoryGroupRepo, PostgresGroupRepo};
pub use meeting::IMeetingRepo;
use meeting::{InMemoryMeetingRepo, PostgresMeetingRepo};
pub use meeting_participant::{IMeetingParticipantRepo, ParticipantInsertResult};
use meeting_participant::{InMemoryMeetingParticipantRepo, PostgresMeetingParticipantRepo};
pub use meeting_requirement::IMeetingRequirementRepo;
use meeting_requirement::{InMemoryMeetingRequirementRepo, PostgresMeetingRequirementRepo};
pub use requirement_fulfillment::IRequirementFulfillmentRepo;
use requirement_fulfillment::{
    InMemoryRequirementFulfillmentRepo, PostgresRequirementFulfillmentRepo,
};
pub use review::IReviewRepo;
use review::{InMemoryReviewRepo, PostgresReviewRepo};
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

/// Every table the service depends on. None of them are optional.
const REQUIRED_TABLES: [&str; 11] = [
    "users",
    "auth_tokens",
    "groups",
    "group_members",
    "group_admins",
    "books",
    "reviews",
    "meetings",
    "meeting_requirements",
    "meeting_requirement_fulfillments",
    "meeting_participants",
];

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub groups: Arc<dyn IGroupRepo>,
    pub books: Arc<dyn IBookRepo>,
    pub reviews: Arc<dyn IReviewRepo>,
    pub meetings: Arc<dyn IMeetingRepo>,
    pub meeting_requirements: Arc<dyn IMeetingRequirementRepo>,
    pub requirement_fulfillments: Arc<dyn IRequirementFulfillmentRepo>,
    pub meeting_participants: Arc<dyn IMeetingParticipantRepo>,
}

impl Repos {
    pub async fn create_postgres(pool: PgPool) -> anyhow::Result<Self> {
        info!("DB CHECKING SCHEMA ...");
        verify_schema(&pool).await?;
        info!("DB CHECKING SCHEMA ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            groups: Arc::new(PostgresGroupRepo::new(pool.clone())),
            books: Arc::new(PostgresBookRepo::new(pool.clone())),
            reviews: Arc::new(PostgresReviewRepo::new(pool.clone())),
            meetings: Arc::new(PostgresMeetingRepo::new(pool.clone())),
            meeting_requirements: Arc::new(PostgresMeetingRequirementRepo::new(pool.clone())),
            requirement_fulfillments: Arc::new(PostgresRequirementFulfillmentRepo::new(
                pool.clone(),
            )),
            meeting_participants: Arc::new(PostgresMeetingParticipantRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        // Meetings and their requirements are written together
        let requirements = Arc::new(Mutex::new(Vec::new()));

        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            groups: Arc::new(InMemoryGroupRepo::new()),
            books: Arc::new(InMemoryBookRepo::new()),
            reviews: Arc::new(InMemoryReviewRepo::new()),
            meetings: Arc::new(InMemoryMeetingRepo::new(requirements.clone())),
            meeting_requirements: Arc::new(InMemoryMeetingRequirementRepo::new(requirements)),
            requirement_fulfillments: Arc::new(InMemoryRequirementFulfillmentRepo::new()),
            meeting_participants: Arc::new(InMemoryMeetingParticipantRepo::new()),
        }
    }
}

/// Fails when a table is missing so that the service refuses to start
/// instead of failing on the first request that touches it.
async fn verify_schema(pool: &PgPool) -> anyhow::Result<()> {
    for table in REQUIRED_TABLES.iter() {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1::text) IS NOT NULL")
            .bind(*table)
            .fetch_one(pool)
            .await?;
        if !exists {
            return Err(anyhow::anyhow!(
                "Required table `{}` is missing from the database",
                table
            ));
        }
    }
    Ok(())
}
