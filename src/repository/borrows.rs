//! Borrows repository for database operations
//!
//! Borrowing and returning each run in a single transaction that first locks
//! the book row, so concurrent requests on the same book are serialized and
//! the quantity always matches the number of copies not lent out.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow::BookBorrow,
};

const BORROW_COLUMNS: &str = "id, book_id, user_id, borrow_date, return_date";

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List borrows that have not been returned yet
    pub async fn list_active(&self) -> AppResult<Vec<BookBorrow>> {
        let borrows = sqlx::query_as::<_, BookBorrow>(&format!(
            "SELECT {} FROM book_borrows WHERE return_date IS NULL ORDER BY id",
            BORROW_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(borrows)
    }

    /// Lend one copy of a book to a user
    pub async fn borrow(&self, book_id: i32, user_id: i32) -> AppResult<BookBorrow> {
        let mut tx = self.pool.begin().await?;

        let quantity = lock_book(&mut *tx, book_id).await?;
        if quantity <= 0 {
            return Err(AppError::Conflict("Book is not available".to_string()));
        }

        let user_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        if !user_exists {
            return Err(AppError::NotFound(format!("User with id {} does not exist", user_id)));
        }

        let already_borrowed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_borrows WHERE book_id = $1 AND user_id = $2 AND return_date IS NULL)",
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if already_borrowed {
            return Err(AppError::Conflict("Book is already borrowed".to_string()));
        }

        let borrow = sqlx::query_as::<_, BookBorrow>(&format!(
            "INSERT INTO book_borrows (book_id, user_id) VALUES ($1, $2) RETURNING {}",
            BORROW_COLUMNS
        ))
        .bind(book_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_constraint(e, "Book is already borrowed"))?;

        sqlx::query("UPDATE books SET quantity = quantity - 1 WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(borrow)
    }

    /// Close the active borrow of a book by a user and put the copy back
    pub async fn return_book(&self, book_id: i32, user_id: i32) -> AppResult<BookBorrow> {
        let mut tx = self.pool.begin().await?;

        lock_book(&mut *tx, book_id).await?;

        let returned = sqlx::query_as::<_, BookBorrow>(&format!(
            r#"
            UPDATE book_borrows SET return_date = NOW()
            WHERE book_id = $1 AND user_id = $2 AND return_date IS NULL
            RETURNING {}
            "#,
            BORROW_COLUMNS
        ))
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Conflict("Book is not borrowed".to_string()))?;

        sqlx::query("UPDATE books SET quantity = quantity + 1 WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(returned)
    }
}

/// Lock the book row for the rest of the transaction and return its quantity
async fn lock_book(conn: &mut PgConnection, book_id: i32) -> AppResult<i32> {
    sqlx::query_scalar::<_, i32>("SELECT quantity FROM books WHERE id = $1 FOR UPDATE")
        .bind(book_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} does not exist", book_id)))
}
