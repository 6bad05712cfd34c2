use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, cookie::CookieJar};

use crate::forms::FormErrors;
use crate::forms::artist::ArtistForm;
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
    let artists = state.artists().list().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::artists::index(&artists, &flashes))).into_response())
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let now = state.clock.now();
    let term = form.search_term.trim();
    let results = state.artists().search(term, now).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::artists::search(term, &results, &flashes))).into_response())
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(artist_id): Path<i64>,
) -> Result<Response, AppError> {
    let now = state.clock.now();
    let detail = state.artists().detail(artist_id, now).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::artists::detail(&detail, &flashes))).into_response())
}

pub async fn create_form(jar: CookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    let page = views::forms::artist_form(
        "List a new artist",
        "/artists/create",
        &ArtistForm::default(),
        &FormErrors::default(),
        &flashes,
    );
    (jar, Html(page)).into_response()
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let (jar, flashes) = flash::take(jar);
            let page = views::forms::artist_form(
                "List a new artist",
                "/artists/create",
                &form,
                &errors,
                &flashes,
            );
            return Ok((jar, Html(page)).into_response());
        }
    };

    let name = input.name.clone();
    match state.artists().create(input).await {
        Ok(artist) => {
            let jar = flash::push(
                jar,
                Flash::info(format!("Artist {} was successfully listed!", artist.name)),
            );
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err) => {
            tracing::error!("Failed to create artist '{}': {:?}", name, err);
            let message = format!("An error occurred. Artist {name} could not be listed.");
            home::render(&state, jar, Some(Flash::error(message))).await
        }
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(artist_id): Path<i64>,
) -> Result<Response, AppError> {
    let artist = state.artists().get(artist_id).await?;
    let (jar, flashes) = flash::take(jar);
    let page = views::forms::artist_form(
        &format!("Edit artist {}", artist.name),
        &format!("/artists/{artist_id}/edit"),
        &ArtistForm::from_artist(&artist),
        &FormErrors::default(),
        &flashes,
    );
    Ok((jar, Html(page)).into_response())
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(artist_id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let artist = state.artists().get(artist_id).await?;
            let (jar, flashes) = flash::take(jar);
            let page = views::forms::artist_form(
                &format!("Edit artist {}", artist.name),
                &format!("/artists/{artist_id}/edit"),
                &form,
                &errors,
                &flashes,
            );
            return Ok((jar, Html(page)).into_response());
        }
    };

    let name = input.name.clone();
    match state.artists().update(artist_id, input).await {
        Ok(artist) => {
            let jar = flash::push(
                jar,
                Flash::info(format!("Artist {} was successfully edited!", artist.name)),
            );
            Ok((jar, Redirect::to(&format!("/artists/{artist_id}"))).into_response())
        }
        Err(err @ ServiceError::NotFound { .. }) => Err(err.into()),
        Err(err) => {
            tracing::error!("Failed to edit artist {}: {:?}", artist_id, err);
            let message = format!("An error occurred. Artist {name} could not be edited.");
            home::render(&state, jar, Some(Flash::error(message))).await
        }
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(artist_id): Path<i64>,
) -> Result<Response, AppError> {
    let artist = state.artists().get(artist_id).await?;

    let message = match state.artists().delete(artist_id).await {
        Ok(name) => Flash::info(format!("Artist {name} was successfully deleted!")),
        Err(err) => {
            tracing::error!("Failed to delete artist {}: {:?}", artist_id, err);
            Flash::error(format!(
                "An error occurred. Artist {} could not be deleted.",
                artist.name
            ))
        }
    };

    Ok((flash::push(jar, message), Redirect::to("/")).into_response())
}
