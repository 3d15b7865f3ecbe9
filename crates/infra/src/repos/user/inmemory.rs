use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{AuthToken, User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
    auth_tokens: std::sync::Mutex<Vec<AuthToken>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
            auth_tokens: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        Ok(find(user_id, &self.users))
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        Ok(find_by(&self.users, |u| user_ids.contains(&u.id)))
    }

    async fn insert_auth_token(&self, token: &AuthToken) -> anyhow::Result<()> {
        insert(token, &self.auth_tokens);
        Ok(())
    }

    async fn find_by_auth_token(
        &self,
        token: &str,
        timestamp: i64,
    ) -> anyhow::Result<Option<User>> {
        let auth_token =
            find_first_by(&self.auth_tokens, |t| t.token == token && t.is_valid_at(timestamp));
        match auth_token {
            Some(auth_token) => Ok(find(&auth_token.user_id, &self.users)),
            None => Ok(None),
        }
    }
}
