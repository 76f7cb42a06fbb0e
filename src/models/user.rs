//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Create / update user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(length(min = 1, max = 100, message = "First name is required (max 100 characters)"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required (max 100 characters)"))]
    pub last_name: String,
}
