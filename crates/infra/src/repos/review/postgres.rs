use super::IReviewRepo;
use bookclub_domain::{Review, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReviewRepo {
    pool: PgPool,
}

impl PostgresReviewRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewRaw {
    review_uid: Uuid,
    book_uid: Uuid,
    user_uid: Uuid,
    group_uid: Option<Uuid>,
    rating: i32,
    review: String,
    created: i64,
}

impl From<ReviewRaw> for Review {
    fn from(e: ReviewRaw) -> Self {
        Self {
            id: e.review_uid.into(),
            book_id: e.book_uid.into(),
            user_id: e.user_uid.into(),
            group_id: e.group_uid.map(|id| id.into()),
            rating: e.rating,
            review: e.review,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl IReviewRepo for PostgresReviewRepo {
    async fn insert(&self, review: &Review) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews(review_uid, book_uid, user_uid, group_uid, rating, review, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id.inner_ref())
        .bind(review.book_id.inner_ref())
        .bind(review.user_id.inner_ref())
        .bind(review.group_id.as_ref().map(|id| *id.inner_ref()))
        .bind(review.rating)
        .bind(&review.review)
        .bind(review.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_for_book(
        &self,
        user_id: &ID,
        book_id: &ID,
        group_id: &ID,
    ) -> anyhow::Result<Option<Review>> {
        let review: Option<ReviewRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reviews AS r
            WHERE r.user_uid = $1 AND
            r.book_uid = $2 AND
            r.group_uid = $3
            ORDER BY r.created
            LIMIT 1
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(book_id.inner_ref())
        .bind(group_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(review.map(|r| r.into()))
    }
}
