use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, cookie::CookieJar};

use crate::forms::FormErrors;
use crate::forms::venue::VenueForm;
use crate::http_server::{
    error::AppError,
    flash::{self, Flash},
    http_routes::{SearchForm, home},
    state::AppState,
    views,
};
use crate::services::error::ServiceError;

pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let now = state.clock.now();
    let areas = state.venues().list_areas(now).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::venues::index(&areas, &flashes))).into_response())
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let now = state.clock.now();
    let term = form.search_term.trim();
    let results = state.venues().search(term, now).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::venues::search(term, &results, &flashes))).into_response())
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(venue_id): Path<i64>,
) -> Result<Response, AppError> {
    let now = state.clock.now();
    let detail = state.venues().detail(venue_id, now).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::venues::detail(&detail, &flashes))).into_response())
}

pub async fn create_form(jar: CookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    let page = views::forms::venue_form(
        "List a new venue",
        "/venues/create",
        &VenueForm::default(),
        &FormErrors::default(),
        &flashes,
    );
    (jar, Html(page)).into_response()
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let (jar, flashes) = flash::take(jar);
            let page = views::forms::venue_form(
                "List a new venue",
                "/venues/create",
                &form,
                &errors,
                &flashes,
            );
            return Ok((jar, Html(page)).into_response());
        }
    };

    let name = input.name.clone();
    match state.venues().create(input).await {
        Ok(venue) => {
            let jar = flash::push(
                jar,
                Flash::info(format!("Venue {} was successfully listed!", venue.name)),
            );
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err) => {
            tracing::error!("Failed to create venue '{}': {:?}", name, err);
            let message = format!("An error occurred. Venue {name} could not be listed.");
            home::render(&state, jar, Some(Flash::error(message))).await
        }
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(venue_id): Path<i64>,
) -> Result<Response, AppError> {
    let venue = state.venues().get(venue_id).await?;
    let (jar, flashes) = flash::take(jar);
    let page = views::forms::venue_form(
        &format!("Edit venue {}", venue.name),
        &format!("/venues/{venue_id}/edit"),
        &VenueForm::from_venue(&venue),
        &FormErrors::default(),
        &flashes,
    );
    Ok((jar, Html(page)).into_response())
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(venue_id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            // 404 before showing errors for a venue that does not exist
            let venue = state.venues().get(venue_id).await?;
            let (jar, flashes) = flash::take(jar);
            let page = views::forms::venue_form(
                &format!("Edit venue {}", venue.name),
                &format!("/venues/{venue_id}/edit"),
                &form,
                &errors,
                &flashes,
            );
            return Ok((jar, Html(page)).into_response());
        }
    };

    let name = input.name.clone();
    match state.venues().update(venue_id, input).await {
        Ok(venue) => {
            let jar = flash::push(
                jar,
                Flash::info(format!("Venue {} was successfully edited!", venue.name)),
            );
            Ok((jar, Redirect::to(&format!("/venues/{venue_id}"))).into_response())
        }
        Err(err @ ServiceError::NotFound { .. }) => Err(err.into()),
        Err(err) => {
            tracing::error!("Failed to edit venue {}: {:?}", venue_id, err);
            let message = format!("An error occurred. Venue {name} could not be edited.");
            home::render(&state, jar, Some(Flash::error(message))).await
        }
    }
}

/// Serves both `DELETE /venues/{id}` and `POST /venues/{id}/delete`.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(venue_id): Path<i64>,
) -> Result<Response, AppError> {
    let venue = state.venues().get(venue_id).await?;

    let message = match state.venues().delete(venue_id).await {
        Ok(name) => Flash::info(format!("Venue {name} was successfully deleted!")),
        Err(err) => {
            tracing::error!("Failed to delete venue {}: {:?}", venue_id, err);
            Flash::error(format!(
                "An error occurred. Venue {} could not be deleted.",
                venue.name
            ))
        }
    };

    Ok((flash::push(jar, message), Redirect::to("/")).into_response())
}
