//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    /// Unique across all books
    pub title: String,
    /// Copies currently on the shelf
    pub quantity: i32,
}

/// Create / update book request
///
/// A quantity of zero counts as missing, so both create and update need
/// at least one copy.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: String,
    #[validate(range(min = 1, message = "Quantity is required and must be positive"))]
    pub quantity: i32,
}
