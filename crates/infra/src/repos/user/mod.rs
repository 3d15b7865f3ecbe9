mod inmemory;
mod postgres;

use bookclub_domain::{AuthToken, User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>>;
    async fn insert_auth_token(&self, token: &AuthToken) -> anyhow::Result<()>;
    /// Finds the `User` owning the given token if the token has not expired
    /// at `timestamp`
    async fn find_by_auth_token(&self, token: &str, timestamp: i64)
        -> anyhow::Result<Option<User>>;
}
