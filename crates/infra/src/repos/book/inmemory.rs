use super::IBookRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{Book, ID};

pub struct InMemoryBookRepo {
    books: std::sync::Mutex<Vec<Book>>,
}

impl InMemoryBookRepo {
    pub fn new() -> Self {
        Self {
            books: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBookRepo for InMemoryBookRepo {
    async fn insert(&self, book: &Book) -> anyhow::Result<()> {
        insert(book, &self.books);
        Ok(())
    }

    async fn find(&self, book_id: &ID) -> anyhow::Result<Option<Book>> {
        Ok(find(book_id, &self.books))
    }
}
