mod inmemory;
mod postgres;

use bookclub_domain::{Review, ID};
pub use inmemory::InMemoryReviewRepo;
pub use postgres::PostgresReviewRepo;

#[async_trait::async_trait]
pub trait IReviewRepo: Send + Sync {
    async fn insert(&self, review: &Review) -> anyhow::Result<()>;
    /// Finds a `Review` the `User` wrote for the `Book` and shared with the `Group`.
    /// Reviews without a group or shared with another group never match.
    async fn find_for_book(
        &self,
        user_id: &ID,
        book_id: &ID,
        group_id: &ID,
    ) -> anyhow::Result<Option<Review>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::shared::test_utils::{
        create_contexts, insert_book, insert_group, insert_user,
    };
    use bookclub_domain::Review;

    #[tokio::test]
    async fn find_for_book_is_scoped_to_group() {
        for ctx in create_contexts().await {
            let user = insert_user(&ctx).await;
            let other_user = insert_user(&ctx).await;
            let book = insert_book(&ctx).await;
            let group = insert_group(&ctx).await;
            let other_group = insert_group(&ctx).await;

            let private = Review::new(book.id.clone(), user.id.clone(), None, 0);
            let elsewhere = Review::new(
                book.id.clone(),
                user.id.clone(),
                Some(other_group.id.clone()),
                0,
            );
            ctx.repos.reviews.insert(&private).await.unwrap();
            ctx.repos.reviews.insert(&elsewhere).await.unwrap();
            assert!(ctx
                .repos
                .reviews
                .find_for_book(&user.id, &book.id, &group.id)
                .await
                .unwrap()
                .is_none());

            let shared = Review::new(book.id.clone(), user.id.clone(), Some(group.id.clone()), 1);
            ctx.repos.reviews.insert(&shared).await.unwrap();
            let found = ctx
                .repos
                .reviews
                .find_for_book(&user.id, &book.id, &group.id)
                .await
                .unwrap();
            assert_eq!(found, Some(shared));

            // Another user's review does not count
            assert!(ctx
                .repos
                .reviews
                .find_for_book(&other_user.id, &book.id, &group.id)
                .await
                .unwrap()
                .is_none());
        }
    }
}
