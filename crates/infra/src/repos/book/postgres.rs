use super::IBookRepo;
use bookclub_domain::{Book, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresBookRepo {
    pool: PgPool,
}

impl PostgresBookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookRaw {
    book_uid: Uuid,
    title: String,
    author: String,
    isbn: Option<String>,
    page_count: Option<i32>,
    created: i64,
}

impl From<BookRaw> for Book {
    fn from(e: BookRaw) -> Self {
        Self {
            id: e.book_uid.into(),
            title: e.title,
            author: e.author,
            isbn: e.isbn,
            page_count: e.page_count,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl IBookRepo for PostgresBookRepo {
    async fn insert(&self, book: &Book) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO books(book_uid, title, author, isbn, page_count, created)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id.inner_ref())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.page_count)
        .bind(book.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, book_id: &ID) -> anyhow::Result<Option<Book>> {
        let book: Option<BookRaw> = sqlx::query_as(
            r#"
            SELECT * FROM books AS b
            WHERE b.book_uid = $1
            "#,
        )
        .bind(book_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(book.map(|b| b.into()))
    }
}
