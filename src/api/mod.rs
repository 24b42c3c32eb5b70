//! HTTP handlers and routing

pub mod auth;
pub mod authors;
pub mod books;
pub mod health;
pub mod index;
pub mod loans;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Page sizes of the list endpoints
pub const AUTHORS_PER_PAGE: i64 = 3;
pub const BOOKS_PER_PAGE: i64 = 3;
pub const BORROWED_PER_PAGE: i64 = 10;

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Authenticated user holding `catalog.can_mark_returned`.
///
/// Resolved from the request head, so the permission is checked before any
/// body extractor runs.
pub struct CanMarkReturned(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for CanMarkReturned {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        claims.require_mark_returned()?;
        Ok(CanMarkReturned(claims))
    }
}

/// Current calendar date (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/", get(index::index))
        // Books
        .route("/books/", get(books::list_books))
        .route("/book/create", get(books::create_book_form).post(books::create_book))
        .route("/book/:id", get(books::get_book))
        .route("/book/:id/update", get(books::update_book_form).post(books::update_book))
        .route("/book/:id/renew/", get(loans::renew_book_form).post(loans::renew_book))
        // Authors
        .route("/authors/", get(authors::list_authors))
        .route("/author/create", get(authors::create_author_form).post(authors::create_author))
        .route("/author/:id", get(authors::get_author))
        .route("/author/:id/update", get(authors::update_author_form).post(authors::update_author))
        .route("/author/:id/delete", get(authors::delete_author_form).post(authors::delete_author))
        // Loans
        .route("/mybooks/", get(loans::my_borrowed))
        .route("/borrowed/", get(loans::all_borrowed))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state);

    Router::new()
        .merge(catalog)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
