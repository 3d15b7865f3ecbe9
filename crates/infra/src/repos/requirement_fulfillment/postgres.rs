use super::IRequirementFulfillmentRepo;
use bookclub_domain::{RequirementFulfillment, ID};
use serde_json::Value;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresRequirementFulfillmentRepo {
    pool: PgPool,
}

impl PostgresRequirementFulfillmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RequirementFulfillmentRaw {
    fulfillment_uid: Uuid,
    meeting_uid: Uuid,
    user_uid: Uuid,
    requirement_uid: Uuid,
    fulfilled_at: i64,
    fulfillment_data: Value,
}

impl From<RequirementFulfillmentRaw> for RequirementFulfillment {
    fn from(e: RequirementFulfillmentRaw) -> Self {
        Self {
            id: e.fulfillment_uid.into(),
            meeting_id: e.meeting_uid.into(),
            user_id: e.user_uid.into(),
            requirement_id: e.requirement_uid.into(),
            fulfilled_at: e.fulfilled_at,
            data: e.fulfillment_data,
        }
    }
}

#[async_trait::async_trait]
impl IRequirementFulfillmentRepo for PostgresRequirementFulfillmentRepo {
    async fn insert(&self, fulfillment: &RequirementFulfillment) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO meeting_requirement_fulfillments(
                fulfillment_uid,
                meeting_uid,
                user_uid,
                requirement_uid,
                fulfilled_at,
                fulfillment_data
            )
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (meeting_uid, user_uid, requirement_uid) DO NOTHING
            "#,
        )
        .bind(fulfillment.id.inner_ref())
        .bind(fulfillment.meeting_id.inner_ref())
        .bind(fulfillment.user_id.inner_ref())
        .bind(fulfillment.requirement_id.inner_ref())
        .bind(fulfillment.fulfilled_at)
        .bind(&fulfillment.data)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn find(
        &self,
        requirement_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<RequirementFulfillment>> {
        let fulfillment: Option<RequirementFulfillmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meeting_requirement_fulfillments AS f
            WHERE f.requirement_uid = $1 AND f.user_uid = $2
            "#,
        )
        .bind(requirement_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(fulfillment.map(|f| f.into()))
    }

    async fn find_by_meeting_and_user(
        &self,
        meeting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Vec<RequirementFulfillment>> {
        let fulfillments: Vec<RequirementFulfillmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meeting_requirement_fulfillments AS f
            WHERE f.meeting_uid = $1 AND f.user_uid = $2
            "#,
        )
        .bind(meeting_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(fulfillments.into_iter().map(|f| f.into()).collect())
    }
}
