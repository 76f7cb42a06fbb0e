//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, title, quantity FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} does not exist", id)))
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, quantity FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// List books with at least one copy on the shelf
    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, quantity FROM books WHERE quantity > 0 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Check if a title is already used, optionally ignoring one book
    pub async fn title_exists(&self, title: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND id != $2)")
                .bind(title)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new book
    pub async fn create(&self, book: &BookPayload) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, quantity)
            VALUES ($1, $2)
            RETURNING id, title, quantity
            "#,
        )
        .bind(&book.title)
        .bind(book.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Book title already exists"))?;

        Ok(created)
    }

    /// Overwrite title and quantity of a book
    pub async fn update(&self, id: i32, book: &BookPayload) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, quantity = $2
            WHERE id = $3
            RETURNING id, title, quantity
            "#,
        )
        .bind(&book.title)
        .bind(book.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Book title already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} does not exist", id)))
    }

    /// Delete a book; refused by the store while borrow rows reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "Book has borrow records and cannot be deleted"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} does not exist", id)));
        }
        Ok(())
    }
}
