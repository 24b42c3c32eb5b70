//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDetail, BookForm, BookFormContext, BookShort},
        Page, PageQuery,
    },
    AppState,
};

use super::{today, CanMarkReturned, BOOKS_PER_PAGE};

/// List books
#[utoipa::path(
    get,
    path = "/books/",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of books", body = Page<BookShort>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<BookShort>>> {
    let page = state.services.catalog.list_books(&query, BOOKS_PER_PAGE).await?;
    Ok(Json(page))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.catalog.book_detail(id, today()).await?;
    Ok(Json(book))
}

/// Empty book form with its choices
#[utoipa::path(
    get,
    path = "/book/create",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book form", body = BookFormContext),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Permission required")
    )
)]
pub async fn create_book_form(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
) -> AppResult<Json<BookFormContext>> {
    let context = state.services.catalog.book_form(None).await?;
    Ok(Json(context))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/book/create",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookForm,
    responses(
        (status = 303, description = "Book created, redirect to its page"),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Permission required")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Json(form), _): WithRejection<Json<BookForm>, AppError>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.create_book(form).await?;
    Ok(Redirect::to(&book.get_absolute_url()))
}

/// Book form pre-filled from an existing book
#[utoipa::path(
    get,
    path = "/book/{id}/update",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book form", body = BookFormContext),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_form(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<BookFormContext>> {
    let context = state.services.catalog.book_form(Some(id)).await?;
    Ok(Json(context))
}

/// Update an existing book
#[utoipa::path(
    post,
    path = "/book/{id}/update",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 303, description = "Book updated, redirect to its page"),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(form), _): WithRejection<Json<BookForm>, AppError>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.update_book(id, form).await?;
    Ok(Redirect::to(&book.get_absolute_url()))
}
