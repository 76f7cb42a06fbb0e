//! Data models

pub mod book;
pub mod borrow;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookPayload};
pub use borrow::{BookBorrow, BorrowRequest};
pub use user::{User, UserPayload};
