use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub created: i64,
}

impl User {
    pub fn new(username: impl Into<String>, created: i64) -> Self {
        Self {
            id: Default::default(),
            username: username.into(),
            created,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Opaque session token handed out at login and sent back in the
/// `auth_token` cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub token: String,
    pub user_id: ID,
    pub created: i64,
    /// No expiry when `None`
    pub expires_at: Option<i64>,
}

impl AuthToken {
    pub fn is_valid_at(&self, timestamp: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => timestamp < expires_at,
            None => true,
        }
    }
}
