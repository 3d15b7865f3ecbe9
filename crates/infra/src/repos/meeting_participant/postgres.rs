use super::{IMeetingParticipantRepo, ParticipantInsertResult};
use bookclub_domain::{MeetingParticipant, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresMeetingParticipantRepo {
    pool: PgPool,
}

impl PostgresMeetingParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MeetingParticipantRaw {
    meeting_uid: Uuid,
    user_uid: Uuid,
    status: String,
    registered_at: i64,
}

impl From<MeetingParticipantRaw> for MeetingParticipant {
    fn from(e: MeetingParticipantRaw) -> Self {
        Self {
            meeting_id: e.meeting_uid.into(),
            user_id: e.user_uid.into(),
            status: e.status.into(),
            registered_at: e.registered_at,
        }
    }
}

#[async_trait::async_trait]
impl IMeetingParticipantRepo for PostgresMeetingParticipantRepo {
    async fn find(
        &self,
        meeting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<MeetingParticipant>> {
        let participant: Option<MeetingParticipantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meeting_participants AS p
            WHERE p.meeting_uid = $1 AND p.user_uid = $2
            "#,
        )
        .bind(meeting_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant.map(|p| p.into()))
    }

    async fn find_registered(&self, meeting_id: &ID) -> anyhow::Result<Vec<MeetingParticipant>> {
        let participants: Vec<MeetingParticipantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM meeting_participants AS p
            WHERE p.meeting_uid = $1 AND p.status = 'registered'
            ORDER BY p.registered_at
            "#,
        )
        .bind(meeting_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(participants.into_iter().map(|p| p.into()).collect())
    }

    async fn count_registered(&self, meeting_id: &ID) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM meeting_participants AS p
            WHERE p.meeting_uid = $1 AND p.status = 'registered'
            "#,
        )
        .bind(meeting_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn insert_within_capacity(
        &self,
        participant: &MeetingParticipant,
        max_participants: Option<i64>,
    ) -> anyhow::Result<ParticipantInsertResult> {
        let mut tx = self.pool.begin().await?;

        // Registrations for the same meeting wait for each other here
        sqlx::query(
            r#"
            SELECT m.meeting_uid FROM meetings AS m
            WHERE m.meeting_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(participant.meeting_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;

        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM meeting_participants AS p
                WHERE p.meeting_uid = $1 AND p.user_uid = $2
            )
            "#,
        )
        .bind(participant.meeting_id.inner_ref())
        .bind(participant.user_id.inner_ref())
        .fetch_one(&mut *tx)
        .await?;
        if exists {
            tx.rollback().await?;
            return Ok(ParticipantInsertResult::Duplicate);
        }

        if let Some(max) = max_participants {
            let registered: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM meeting_participants AS p
                WHERE p.meeting_uid = $1 AND p.status = 'registered'
                "#,
            )
            .bind(participant.meeting_id.inner_ref())
            .fetch_one(&mut *tx)
            .await?;

            if registered >= max {
                tx.rollback().await?;
                return Ok(ParticipantInsertResult::CapacityReached);
            }
        }

        let res = sqlx::query(
            r#"
            INSERT INTO meeting_participants(meeting_uid, user_uid, status, registered_at)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (meeting_uid, user_uid) DO NOTHING
            "#,
        )
        .bind(participant.meeting_id.inner_ref())
        .bind(participant.user_id.inner_ref())
        .bind(participant.status.as_str())
        .bind(participant.registered_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert meeting participant: {:?}. DB returned error: {:?}",
                participant, e
            );
            e
        })?;

        tx.commit().await?;

        if res.rows_affected() == 0 {
            Ok(ParticipantInsertResult::Duplicate)
        } else {
            Ok(ParticipantInsertResult::Inserted)
        }
    }
}
