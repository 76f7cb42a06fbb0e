//! User management service

use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserPayload},
    repository::Repository,
};

use super::bounded;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    timeout: Duration,
}

impl UsersService {
    pub fn new(repository: Repository, timeout: Duration) -> Self {
        Self { repository, timeout }
    }

    /// Create a user unless the first/last name pair is taken
    #[tracing::instrument(skip(self))]
    pub async fn create_user(&self, user: UserPayload) -> AppResult<User> {
        bounded(self.timeout, "create_user", async {
            if self
                .repository
                .users
                .name_exists(&user.first_name, &user.last_name, None)
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "User with name {} {} already exists",
                    user.first_name, user.last_name
                )));
            }

            let created = self.repository.users.create(&user).await?;
            tracing::info!(user_id = created.id, "User created");
            Ok(created)
        })
        .await
    }

    /// Get user by ID
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        bounded(self.timeout, "get_user", self.repository.users.get_by_id(id)).await
    }

    /// List all users
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<User>> {
        bounded(self.timeout, "list_users", self.repository.users.list()).await
    }

    /// Fail with NotFound unless the user exists
    pub async fn ensure_exists(&self, id: i32) -> AppResult<()> {
        if self.repository.users.exists(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("User with id {} does not exist", id)))
        }
    }

    /// Overwrite both names of a user
    #[tracing::instrument(skip(self))]
    pub async fn update_user(&self, id: i32, user: UserPayload) -> AppResult<User> {
        bounded(self.timeout, "update_user", async {
            self.ensure_exists(id).await?;

            if self
                .repository
                .users
                .name_exists(&user.first_name, &user.last_name, Some(id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "User with name {} {} already exists",
                    user.first_name, user.last_name
                )));
            }

            self.repository.users.update(id, &user).await
        })
        .await
    }

    /// Delete a user
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        bounded(self.timeout, "delete_user", async {
            self.ensure_exists(id).await?;
            self.repository.users.delete(id).await?;
            tracing::info!(user_id = id, "User deleted");
            Ok(())
        })
        .await
    }
}
