use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::http_server::{
    error::AppError,
    flash::{self, Flash},
    state::AppState,
    views,
};

pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    render(&state, jar, None).await
}

/// Render the home page with any queued flashes plus `extra`, which is shown
/// right away instead of surviving a redirect.
pub(crate) async fn render(
    state: &AppState,
    jar: CookieJar,
    extra: Option<Flash>,
) -> Result<Response, AppError> {
    let limit = state.config.recent_listings;
    let venues = state.venues().recent(limit).await?;
    let artists = state.artists().recent(limit).await?;

    let (jar, mut flashes) = flash::take(jar);
    flashes.extend(extra);

    Ok((jar, Html(views::home::page(&venues, &artists, &flashes))).into_response())
}
