mod inmemory;
mod postgres;

use bookclub_domain::{Book, ID};
pub use inmemory::InMemoryBookRepo;
pub use postgres::PostgresBookRepo;

#[async_trait::async_trait]
pub trait IBookRepo: Send + Sync {
    async fn insert(&self, book: &Book) -> anyhow::Result<()>;
    async fn find(&self, book_id: &ID) -> anyhow::Result<Option<Book>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::shared::test_utils::{create_contexts, insert_book};
    use bookclub_domain::ID;

    #[tokio::test]
    async fn create_and_find() {
        for ctx in create_contexts().await {
            let book = insert_book(&ctx).await;

            let found = ctx.repos.books.find(&book.id).await.unwrap();
            assert_eq!(found, Some(book));
            assert!(ctx.repos.books.find(&ID::default()).await.unwrap().is_none());
        }
    }
}
