use super::IGroupRepo;
use bookclub_domain::{Group, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresGroupRepo {
    pool: PgPool,
}

impl PostgresGroupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRaw {
    group_uid: Uuid,
    name: String,
    description: Option<String>,
    created: i64,
    deleted_at: Option<i64>,
}

impl From<GroupRaw> for Group {
    fn from(e: GroupRaw) -> Self {
        Self {
            id: e.group_uid.into(),
            name: e.name,
            description: e.description,
            created: e.created,
            deleted_at: e.deleted_at,
        }
    }
}

#[async_trait::async_trait]
impl IGroupRepo for PostgresGroupRepo {
    async fn insert(&self, group: &Group) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO groups(group_uid, name, description, created, deleted_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(group.id.inner_ref())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.created)
        .bind(group.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, group_id: &ID) -> anyhow::Result<Option<Group>> {
        let group: Option<GroupRaw> = sqlx::query_as(
            r#"
            SELECT * FROM groups AS g
            WHERE g.group_uid = $1 AND g.deleted_at IS NULL
            "#,
        )
        .bind(group_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(group.map(|g| g.into()))
    }

    async fn delete(&self, group_id: &ID, timestamp: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE groups
            SET deleted_at = $2
            WHERE group_uid = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(group_id.inner_ref())
        .bind(timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_member(&self, group_id: &ID, user_id: &ID, timestamp: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO group_members(group_uid, user_uid, joined_at)
            VALUES($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(group_id.inner_ref())
        .bind(user_id.inner_ref())
        .bind(timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_admin(&self, group_id: &ID, user_id: &ID, timestamp: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO group_admins(group_uid, user_uid, created)
            VALUES($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(group_id.inner_ref())
        .bind(user_id.inner_ref())
        .bind(timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_member(&self, group_id: &ID, user_id: &ID) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_members AS m
                WHERE m.group_uid = $1 AND m.user_uid = $2
            )
            "#,
        )
        .bind(group_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn is_admin(&self, group_id: &ID, user_id: &ID) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_admins AS a
                WHERE a.group_uid = $1 AND a.user_uid = $2
            )
            "#,
        )
        .bind(group_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
