//! Home page

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::sessions::SessionsService, AppState};

/// Home page context
#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    /// Earlier home page loads in this session
    pub num_visits: i64,
}

/// Catalog counts and the session's visit counter
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "Home page counts", body = IndexResponse)
    )
)]
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<IndexResponse>)> {
    let cookie_name = state.config.session.cookie_name.clone();

    let existing = jar
        .get(&cookie_name)
        .map(|c| c.value().to_string())
        .filter(|id| SessionsService::is_valid_session_id(id));

    let (jar, session_id) = match existing {
        Some(id) => (jar, id),
        None => {
            let id = SessionsService::new_session_id();
            let cookie = Cookie::build((cookie_name, id.clone()))
                .path("/")
                .http_only(true);
            (jar.add(cookie), id)
        }
    };

    let counts = state.services.catalog.counts().await?;
    let num_visits = state.services.sessions.record_visit(&session_id).await?;

    Ok((
        jar,
        Json(IndexResponse {
            num_books: counts.num_books,
            num_instances: counts.num_instances,
            num_instances_available: counts.num_instances_available,
            num_authors: counts.num_authors,
            num_genres: counts.num_genres,
            num_visits,
        }),
    ))
}
