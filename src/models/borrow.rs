//! Book borrow model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Borrow record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookBorrow {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub borrow_date: DateTime<Utc>,
    /// `None` while the book is still out
    pub return_date: Option<DateTime<Utc>>,
}

/// Borrow / return request
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct BorrowRequest {
    #[validate(range(min = 1, message = "book_id is required"))]
    pub book_id: i32,
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i32,
}
