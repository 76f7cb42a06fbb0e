//! Business logic services

pub mod books;
pub mod borrows;
pub mod users;

use std::{future::Future, time::Duration};

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub books: books::BooksService,
    pub borrows: borrows::BorrowsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, database_config: &DatabaseConfig) -> Self {
        let timeout = database_config.operation_timeout();

        Self {
            users: users::UsersService::new(repository.clone(), timeout),
            books: books::BooksService::new(repository.clone(), timeout),
            borrows: borrows::BorrowsService::new(repository.clone(), timeout),
            repository,
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Abort `operation` once `limit` has elapsed.
///
/// Dropping the future releases its connection; an open transaction is
/// rolled back.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| AppError::Timeout(operation.to_string()))?
}
