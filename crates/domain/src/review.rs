use crate::shared::entity::{Entity, ID};

/// A `User`s review of a `Book`, optionally shared with a `Group`.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ID,
    pub book_id: ID,
    pub user_id: ID,
    pub group_id: Option<ID>,
    pub rating: i32,
    pub review: String,
    pub created: i64,
}

impl Review {
    pub fn new(book_id: ID, user_id: ID, group_id: Option<ID>, created: i64) -> Self {
        Self {
            id: Default::default(),
            book_id,
            user_id,
            group_id,
            rating: 5,
            review: String::new(),
            created,
        }
    }
}

impl Entity for Review {
    fn id(&self) -> &ID {
        &self.id
    }
}
