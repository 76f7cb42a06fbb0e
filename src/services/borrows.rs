//! Borrow workflow service

use std::time::Duration;

use crate::{
    error::AppResult,
    models::{book::Book, borrow::BookBorrow},
    repository::Repository,
};

use super::bounded;

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
    timeout: Duration,
}

impl BorrowsService {
    pub fn new(repository: Repository, timeout: Duration) -> Self {
        Self { repository, timeout }
    }

    /// Books with at least one copy on the shelf
    #[tracing::instrument(skip(self))]
    pub async fn available_books(&self) -> AppResult<Vec<Book>> {
        bounded(self.timeout, "available_books", self.repository.books.list_available()).await
    }

    /// Borrows not returned yet
    #[tracing::instrument(skip(self))]
    pub async fn active_borrows(&self) -> AppResult<Vec<BookBorrow>> {
        let borrows = bounded(self.timeout, "active_borrows", self.repository.borrows.list_active()).await?;
        tracing::debug!(count = borrows.len(), "Loaded active borrows");
        Ok(borrows)
    }

    /// Borrow a book for a user
    #[tracing::instrument(skip(self))]
    pub async fn borrow_book(&self, book_id: i32, user_id: i32) -> AppResult<BookBorrow> {
        let borrow = bounded(self.timeout, "borrow_book", self.repository.borrows.borrow(book_id, user_id)).await?;
        tracing::info!(borrow_id = borrow.id, "Book borrowed");
        Ok(borrow)
    }

    /// Return a book borrowed by a user
    #[tracing::instrument(skip(self))]
    pub async fn return_book(&self, book_id: i32, user_id: i32) -> AppResult<BookBorrow> {
        let borrow = bounded(self.timeout, "return_book", self.repository.borrows.return_book(book_id, user_id)).await?;
        tracing::info!(borrow_id = borrow.id, "Book returned");
        Ok(borrow)
    }
}
