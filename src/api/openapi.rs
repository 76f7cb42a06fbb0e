//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrows, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending API",
        version = "0.1.0",
        description = "Library lending REST API: users, books and borrows",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrows
        borrows::available_books,
        borrows::active_borrows,
        borrows::borrow_book,
        borrows::return_book,
    ),
    components(
        schemas(
            crate::models::user::User,
            crate::models::user::UserPayload,
            crate::models::book::Book,
            crate::models::book::BookPayload,
            crate::models::borrow::BookBorrow,
            crate::models::borrow::BorrowRequest,
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "books", description = "Book catalog"),
        (name = "borrows", description = "Borrowing and returning books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
