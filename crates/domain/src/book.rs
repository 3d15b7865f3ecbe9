use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: ID,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub page_count: Option<i32>,
    pub created: i64,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, created: i64) -> Self {
        Self {
            id: Default::default(),
            title: title.into(),
            author: author.into(),
            isbn: None,
            page_count: None,
            created,
        }
    }
}

impl Entity for Book {
    fn id(&self) -> &ID {
        &self.id
    }
}
