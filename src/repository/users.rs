//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserPayload},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT id, first_name, last_name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", id)))
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, first_name, last_name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Check if a user exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if the first/last name pair is already taken
    pub async fn name_exists(
        &self,
        first_name: &str,
        last_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE first_name = $1 AND last_name = $2 AND id != $3)",
            )
            .bind(first_name)
            .bind(last_name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE first_name = $1 AND last_name = $2)",
            )
            .bind(first_name)
            .bind(last_name)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Create a new user
    pub async fn create(&self, user: &UserPayload) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "User with this name already exists"))?;

        Ok(created)
    }

    /// Overwrite both names of a user
    pub async fn update(&self, id: i32, user: &UserPayload) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET first_name = $1, last_name = $2
            WHERE id = $3
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "User with this name already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", id)))
    }

    /// Delete a user; refused by the store while borrow rows reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "User has borrow records and cannot be deleted"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} does not exist", id)));
        }
        Ok(())
    }
}
