use super::IMeetingRepo;
use bookclub_domain::{LocationType, Meeting, MeetingLocation, MeetingRequirement, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresMeetingRepo {
    pool: PgPool,
}

impl PostgresMeetingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MeetingRaw {
    meeting_uid: Uuid,
    group_uid: Uuid,
    title: String,
    description: Option<String>,
    start_ts: i64,
    end_ts: i64,
    location_type: String,
    location_name: Option<String>,
    location_address: Option<String>,
    online_url: Option<String>,
    max_participants: Option<i64>,
    created_by: Uuid,
    created: i64,
    updated: i64,
}

impl TryFrom<MeetingRaw> for Meeting {
    type Error = anyhow::Error;

    fn try_from(e: MeetingRaw) -> anyhow::Result<Self> {
        let location_type = e
            .location_type
            .parse::<LocationType>()
            .map_err(|err| anyhow::anyhow!(err))?;

        Ok(Self {
            id: e.meeting_uid.into(),
            group_id: e.group_uid.into(),
            title: e.title,
            description: e.description,
            start_ts: e.start_ts,
            end_ts: e.end_ts,
            location: MeetingLocation::new(
                location_type,
                e.location_name,
                e.location_address,
                e.online_url,
            ),
            max_participants: e.max_participants,
            created_by: e.created_by.into(),
            created: e.created,
            updated: e.updated,
        })
    }
}

#[async_trait::async_trait]
impl IMeetingRepo for PostgresMeetingRepo {
    async fn insert(
        &self,
        meeting: &Meeting,
        requirements: &[MeetingRequirement],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO meetings(
                meeting_uid,
                group_uid,
                title,
                description,
                start_ts,
                end_ts,
                location_type,
                location_name,
                location_address,
                online_url,
                max_participants,
                created_by,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(meeting.id.inner_ref())
        .bind(meeting.group_id.inner_ref())
        .bind(&meeting.title)
        .bind(&meeting.description)
        .bind(meeting.start_ts)
        .bind(meeting.end_ts)
        .bind(meeting.location.location_type().as_str())
        .bind(meeting.location.name())
        .bind(meeting.location.address())
        .bind(meeting.location.online_url())
        .bind(meeting.max_participants)
        .bind(meeting.created_by.inner_ref())
        .bind(meeting.created)
        .bind(meeting.updated)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert meeting: {:?}. DB returned error: {:?}",
                meeting, e
            );
            e
        })?;

        for requirement in requirements {
            sqlx::query(
                r#"
                INSERT INTO meeting_requirements(
                    requirement_uid,
                    meeting_uid,
                    requirement_type,
                    requirement_data,
                    display_order
                )
                VALUES($1, $2, $3, $4, $5)
                "#,
            )
            .bind(requirement.id.inner_ref())
            .bind(requirement.meeting_id.inner_ref())
            .bind(requirement.requirement_type())
            .bind(requirement.data.to_value())
            .bind(requirement.display_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_in_group(
        &self,
        meeting_id: &ID,
        group_id: &ID,
    ) -> anyhow::Result<Option<Meeting>> {
        let meeting: Option<MeetingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meetings AS m
            WHERE m.meeting_uid = $1 AND m.group_uid = $2
            "#,
        )
        .bind(meeting_id.inner_ref())
        .bind(group_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        meeting.map(Meeting::try_from).transpose()
    }

    async fn find_by_group(&self, group_id: &ID) -> anyhow::Result<Vec<Meeting>> {
        let meetings: Vec<MeetingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meetings AS m
            WHERE m.group_uid = $1
            ORDER BY m.start_ts DESC
            "#,
        )
        .bind(group_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        meetings.into_iter().map(Meeting::try_from).collect()
    }
}
