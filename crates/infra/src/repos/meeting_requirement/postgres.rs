use super::IMeetingRequirementRepo;
use bookclub_domain::{MeetingRequirement, RequirementData, ID};
use serde_json::Value;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMeetingRequirementRepo {
    pool: PgPool,
}

impl PostgresMeetingRequirementRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MeetingRequirementRaw {
    requirement_uid: Uuid,
    meeting_uid: Uuid,
    requirement_type: String,
    requirement_data: Value,
    display_order: i32,
}

impl From<MeetingRequirementRaw> for MeetingRequirement {
    fn from(e: MeetingRequirementRaw) -> Self {
        Self {
            id: e.requirement_uid.into(),
            meeting_id: e.meeting_uid.into(),
            data: RequirementData::from_raw(e.requirement_type, e.requirement_data),
            display_order: e.display_order,
        }
    }
}

#[async_trait::async_trait]
impl IMeetingRequirementRepo for PostgresMeetingRequirementRepo {
    async fn find_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<Vec<MeetingRequirement>> {
        let requirements: Vec<MeetingRequirementRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meeting_requirements AS r
            WHERE r.meeting_uid = $1
            ORDER BY r.display_order, r.requirement_uid
            "#,
        )
        .bind(meeting_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(requirements.into_iter().map(|r| r.into()).collect())
    }
}
