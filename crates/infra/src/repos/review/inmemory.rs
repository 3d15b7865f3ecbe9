use super::IReviewRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{Review, ID};

pub struct InMemoryReviewRepo {
    reviews: std::sync::Mutex<Vec<Review>>,
}

impl InMemoryReviewRepo {
    pub fn new() -> Self {
        Self {
            reviews: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReviewRepo for InMemoryReviewRepo {
    async fn insert(&self, review: &Review) -> anyhow::Result<()> {
        insert(review, &self.reviews);
        Ok(())
    }

    async fn find_for_book(
        &self,
        user_id: &ID,
        book_id: &ID,
        group_id: &ID,
    ) -> anyhow::Result<Option<Review>> {
        Ok(find_first_by(&self.reviews, |r| {
            r.user_id == *user_id && r.book_id == *book_id && r.group_id.as_ref() == Some(group_id)
        }))
    }
}
