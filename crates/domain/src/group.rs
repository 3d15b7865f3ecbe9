use crate::shared::entity::{Entity, ID};

/// A user-formed club. Groups are never removed, they get a
/// `deleted_at` marker instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub created: i64,
    pub deleted_at: Option<i64>,
}

impl Group {
    pub fn new(name: impl Into<String>, created: i64) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            description: None,
            created,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Entity for Group {
    fn id(&self) -> &ID {
        &self.id
    }
}
