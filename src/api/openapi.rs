//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, health, index, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "0.1.0",
        description = "Library catalog and lending API"
    ),
    paths(
        // Home
        index::index,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::update_book_form,
        books::update_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::update_author_form,
        authors::update_author,
        authors::delete_author_form,
        authors::delete_author,
        // Loans
        loans::renew_book_form,
        loans::renew_book,
        loans::my_borrowed,
        loans::all_borrowed,
        // Auth
        auth::login,
        auth::me,
        // Health
        health::health_check,
        health::readiness_check,
    ),
    components(
        schemas(
            index::IndexResponse,
            // Books
            crate::models::book::BookShort,
            crate::models::book::BookDetail,
            crate::models::book::BookForm,
            crate::models::book::BookFormContext,
            crate::models::genre::Genre,
            crate::models::language::Language,
            // Authors
            crate::models::author::AuthorResponse,
            crate::models::author::AuthorShort,
            crate::models::author::AuthorDetail,
            crate::models::author::AuthorForm,
            // Copies
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::BookInstanceResponse,
            crate::models::book_instance::LoanedCopy,
            crate::models::book_instance::RenewBookForm,
            crate::models::book_instance::RenewalContext,
            crate::models::pagination::PageQuery,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "catalog", description = "Home page"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors"),
        (name = "loans", description = "Borrowed copies and renewals"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by secured paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
