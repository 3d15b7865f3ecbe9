mod inmemory;
mod postgres;

use bookclub_domain::{Group, ID};
pub use inmemory::InMemoryGroupRepo;
pub use postgres::PostgresGroupRepo;

#[async_trait::async_trait]
pub trait IGroupRepo: Send + Sync {
    async fn insert(&self, group: &Group) -> anyhow::Result<()>;
    /// Soft deleted `Group`s are never returned
    async fn find(&self, group_id: &ID) -> anyhow::Result<Option<Group>>;
    /// Marks the `Group` as deleted
    async fn delete(&self, group_id: &ID, timestamp: i64) -> anyhow::Result<()>;
    async fn add_member(&self, group_id: &ID, user_id: &ID, timestamp: i64)
        -> anyhow::Result<()>;
    async fn add_admin(&self, group_id: &ID, user_id: &ID, timestamp: i64) -> anyhow::Result<()>;
    async fn is_member(&self, group_id: &ID, user_id: &ID) -> anyhow::Result<bool>;
    async fn is_admin(&self, group_id: &ID, user_id: &ID) -> anyhow::Result<bool>;
}
