use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, cookie::CookieJar};

use crate::forms::FormErrors;
use crate::forms::show::ShowForm;
use crate::http_server::{
    error::AppError,
    flash::{self, Flash},
    http_routes::home,
    state::AppState,
    views,
};
use crate::services::error::ServiceError;

pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let now = state.clock.now();
    let shows = state.shows().list().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::shows::index(&shows, now, &flashes))).into_response())
}

pub async fn create_form(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    let form = ShowForm::starting_at(state.clock.now());
    let page = views::forms::show_form(&form, &FormErrors::default(), &flashes);
    (jar, Html(page)).into_response()
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(rerender(jar, &form, &errors)),
    };

    match state.shows().create(input).await {
        Ok(_) => {
            let jar = flash::push(jar, Flash::info("Show was successfully listed!"));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(ServiceError::NotFound { entity, id }) => {
            let field = if entity == "Venue" { "venue_id" } else { "artist_id" };
            let mut errors = FormErrors::default();
            errors.push(field, format!("No {} with ID {id}.", entity.to_lowercase()));
            Ok(rerender(jar, &form, &errors))
        }
        Err(err) => {
            tracing::error!("Failed to create show: {:?}", err);
            let message = "An error occurred. Show could not be listed.";
            home::render(&state, jar, Some(Flash::error(message))).await
        }
    }
}

fn rerender(jar: CookieJar, form: &ShowForm, errors: &FormErrors) -> Response {
    let (jar, flashes) = flash::take(jar);
    (jar, Html(views::forms::show_form(form, errors, &flashes))).into_response()
}
