//! Lending endpoints: renewal and borrowed-copy lists

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{LoanedCopy, RenewBookForm, RenewalContext},
        Page, PageQuery,
    },
    AppState,
};

use super::{today, AuthenticatedUser, CanMarkReturned, BORROWED_PER_PAGE};

/// Renewal form for a borrowed copy
#[utoipa::path(
    get,
    path = "/book/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Copy and proposed renewal date", body = RenewalContext),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Permission required"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_book_form(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<Json<RenewalContext>> {
    let context = state.services.loans.renewal_form(id, today()).await?;
    Ok(Json(context))
}

/// Apply a renewal
#[utoipa::path(
    post,
    path = "/book/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    request_body = RenewBookForm,
    responses(
        (status = 303, description = "Renewed, redirect to the borrowed list"),
        (status = 400, description = "Invalid renewal date", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Permission required"),
        (status = 404, description = "Book instance not found"),
        (status = 409, description = "Copy is not on loan")
    )
)]
pub async fn renew_book(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    WithRejection(Path(id), _rejection): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(form), _): WithRejection<Json<RenewBookForm>, AppError>,
) -> AppResult<Redirect> {
    state.services.loans.renew(id, &form, today()).await?;
    Ok(Redirect::to("/borrowed/"))
}

/// Copies on loan to the caller
#[utoipa::path(
    get,
    path = "/mybooks/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Caller's borrowed copies", body = Page<LoanedCopy>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrowed(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<LoanedCopy>>> {
    let page = state
        .services
        .loans
        .borrowed_by(claims.user_id, &query, BORROWED_PER_PAGE, today())
        .await?;
    Ok(Json(page))
}

/// Every copy on loan
#[utoipa::path(
    get,
    path = "/borrowed/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All borrowed copies", body = Page<LoanedCopy>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Permission required")
    )
)]
pub async fn all_borrowed(
    State(state): State<AppState>,
    CanMarkReturned(_claims): CanMarkReturned,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<LoanedCopy>>> {
    let page = state
        .services
        .loans
        .all_borrowed(&query, BORROWED_PER_PAGE, today())
        .await?;
    Ok(Json(page))
}
