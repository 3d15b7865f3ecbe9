use super::{Evaluation, RequirementEvaluator};
use bookclub_domain::{MeetingRequirement, RequirementData, ID};
use bookclub_infra::BookclubContext;
use serde_json::json;

/// Met when the `User` has reviewed the `Book` within the `Group` the
/// requirement points to. The review is the evidence.
pub struct BookReviewEvaluator {}

#[async_trait::async_trait]
impl RequirementEvaluator for BookReviewEvaluator {
    async fn evaluate(
        &self,
        requirement: &MeetingRequirement,
        user_id: &ID,
        ctx: &BookclubContext,
    ) -> anyhow::Result<Evaluation> {
        let book_review = match &requirement.data {
            RequirementData::BookReview(book_review) => book_review,
            RequirementData::Other { .. } => return Ok(Evaluation::Unmet),
        };

        let review = ctx
            .repos
            .reviews
            .find_for_book(user_id, &book_review.book_id, &book_review.group_id)
            .await?;

        Ok(match review {
            Some(review) => Evaluation::Fulfilled(json!({ "review_id": review.id })),
            None => Evaluation::Unmet,
        })
    }
}
