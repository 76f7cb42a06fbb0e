//! Borrow and return endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        book::Book,
        borrow::{BookBorrow, BorrowRequest},
    },
};

use super::ValidatedJson;

/// Books that can currently be borrowed
#[utoipa::path(
    get,
    path = "/book_borrow",
    tag = "borrows",
    responses(
        (status = 200, description = "Books with at least one copy available", body = Vec<Book>)
    )
)]
pub async fn available_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.borrows.available_books().await?;
    Ok(Json(books))
}

/// Borrows that have not been returned
#[utoipa::path(
    get,
    path = "/book_borrowed",
    tag = "borrows",
    responses(
        (status = 200, description = "Active borrows", body = Vec<BookBorrow>)
    )
)]
pub async fn active_borrows(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookBorrow>>> {
    let borrows = state.services.borrows.active_borrows().await?;
    Ok(Json(borrows))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/book_borrow",
    tag = "borrows",
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book borrowed", body = BookBorrow),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "Book not available or already borrowed by this user")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<BorrowRequest>,
) -> AppResult<Json<BookBorrow>> {
    let borrow = state
        .services
        .borrows
        .borrow_book(request.book_id, request.user_id)
        .await?;
    Ok(Json(borrow))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/book_borrow",
    tag = "borrows",
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book returned", body = BookBorrow),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is not borrowed by this user")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<BorrowRequest>,
) -> AppResult<Json<BookBorrow>> {
    let borrow = state
        .services
        .borrows
        .return_book(request.book_id, request.user_id)
        .await?;
    Ok(Json(borrow))
}
