mod inmemory;
mod postgres;

use bookclub_domain::{RequirementFulfillment, ID};
pub use inmemory::InMemoryRequirementFulfillmentRepo;
pub use postgres::PostgresRequirementFulfillmentRepo;

#[async_trait::async_trait]
pub trait IRequirementFulfillmentRepo: Send + Sync {
    /// Stores the fulfillment unless the `User` already fulfilled the requirement,
    /// in which case the existing record is kept. Returns whether a new record was stored.
    async fn insert(&self, fulfillment: &RequirementFulfillment) -> anyhow::Result<bool>;
    async fn find(
        &self,
        requirement_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<RequirementFulfillment>>;
    async fn find_by_meeting_and_user(
        &self,
        meeting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Vec<RequirementFulfillment>>;
}
