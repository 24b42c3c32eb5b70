//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{AuthorDetail, AuthorForm, AuthorResponse},
        Page, PageQuery,
    },
    AppState,
};

use super::{CanMarkReturned, AUTHORS_PER_PAGE};

/// List authors
#[utoipa::path(
    get,
    path = "/authors/",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of authors", body = Page<AuthorResponse>),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<AuthorResponse>>> {
    let page = state.services.catalog.list_authors(&query, AUTHORS_PER_PAGE).await?;
    Ok(Json(page))
}

/// Get author details and their books
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetail),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<AuthorDetail>> {
    let author = state.services.catalog.author_detail(id).await?;
    Ok(Json(author))
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/author/create",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Author form", body = AuthorForm),
        (status = 403, description = "Permission required")
    )
)]
pub async fn create_author_form(CanMarkReturned(_claims): CanMarkReturned) -> AppResult<Json<AuthorForm>> {
    Ok(Json(AuthorForm::default()))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/author/create",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Author created, redirect to their page"),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 403, description = "Permission required")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Json(form), _): WithRejection<Json<AuthorForm>, AppError>,
) -> AppResult<Redirect> {
    let author = state.services.catalog.create_author(form).await?;
    Ok(Redirect::to(&author.get_absolute_url()))
}

/// Author form pre-filled from an existing author
#[utoipa::path(
    get,
    path = "/author/{id}/update",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author form", body = AuthorForm),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<AuthorForm>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(AuthorForm::from(author)))
}

/// Update an existing author
#[utoipa::path(
    post,
    path = "/author/{id}/update",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Author updated, redirect to their page"),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(form), _): WithRejection<Json<AuthorForm>, AppError>,
) -> AppResult<Redirect> {
    let author = state.services.catalog.update_author(id, form).await?;
    Ok(Redirect::to(&author.get_absolute_url()))
}

/// Author to confirm before deletion
#[utoipa::path(
    get,
    path = "/author/{id}/delete",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author to delete", body = AuthorResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author_form(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(AuthorResponse::from(author)))
}

/// Delete an author
#[utoipa::path(
    post,
    path = "/author/{id}/delete",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 303, description = "Author deleted, redirect to the author list"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author still has books")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<i32>, AppError>,
) -> AppResult<Redirect> {
    state.services.catalog.delete_author(id).await?;
    Ok(Redirect::to("/authors/"))
}
