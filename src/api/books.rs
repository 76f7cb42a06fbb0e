//! Book catalog endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::book::{Book, BookPayload},
};

use super::{MessageResponse, PathId, ValidatedJson};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Title already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(book): ValidatedJson<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Title used by another book")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    PathId(id): PathId,
    ValidatedJson(book): ValidatedJson<BookPayload>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update_book(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has borrow records")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    PathId(id): PathId,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_book(id).await?;
    Ok(MessageResponse::new("Book was successfully deleted"))
}
