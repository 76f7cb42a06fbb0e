//! Book catalog service

use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload},
    repository::Repository,
};

use super::bounded;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    timeout: Duration,
}

impl BooksService {
    pub fn new(repository: Repository, timeout: Duration) -> Self {
        Self { repository, timeout }
    }

    /// Create a book unless the title is taken
    #[tracing::instrument(skip(self))]
    pub async fn create_book(&self, book: BookPayload) -> AppResult<Book> {
        bounded(self.timeout, "create_book", async {
            if self.repository.books.title_exists(&book.title, None).await? {
                return Err(AppError::Conflict(format!(
                    "Book with title {} already exists",
                    book.title
                )));
            }

            let created = self.repository.books.create(&book).await?;
            tracing::info!(book_id = created.id, "Book created");
            Ok(created)
        })
        .await
    }

    /// Get book by ID
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        bounded(self.timeout, "get_book", self.repository.books.get_by_id(id)).await
    }

    /// List all books
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        bounded(self.timeout, "list_books", self.repository.books.list()).await
    }

    /// Update title and quantity.
    ///
    /// Keeping the stored title skips the uniqueness check, which allows
    /// quantity-only edits. Quantity is not checked against active borrows.
    #[tracing::instrument(skip(self))]
    pub async fn update_book(&self, id: i32, book: BookPayload) -> AppResult<Book> {
        bounded(self.timeout, "update_book", async {
            let current = self.repository.books.get_by_id(id).await?;

            if current.title != book.title
                && self.repository.books.title_exists(&book.title, Some(id)).await?
            {
                return Err(AppError::Conflict(format!(
                    "Book with title {} already exists",
                    book.title
                )));
            }

            self.repository.books.update(id, &book).await
        })
        .await
    }

    /// Delete a book
    #[tracing::instrument(skip(self))]
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        bounded(self.timeout, "delete_book", async {
            self.repository.books.delete(id).await?;
            tracing::info!(book_id = id, "Book deleted");
            Ok(())
        })
        .await
    }
}
