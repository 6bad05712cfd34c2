use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::Config,
    database::Database,
    http_server::{
        error,
        http_routes::{artists, home, shows, venues},
        state::AppState,
    },
    ports::clock::SystemClock,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/venues", get(venues::index))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create),
        )
        .route(
            "/venues/{venue_id}",
            get(venues::detail).delete(venues::delete),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(venues::edit_form).post(venues::edit),
        )
        .route("/venues/{venue_id}/delete", post(venues::delete))
        .route("/artists", get(artists::index))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create),
        )
        .route(
            "/artists/{artist_id}",
            get(artists::detail).delete(artists::delete),
        )
        .route(
            "/artists/{artist_id}/edit",
            get(artists::edit_form).post(artists::edit),
        )
        .route("/artists/{artist_id}/delete", post(artists::delete))
        .route("/shows", get(shows::index))
        .route("/shows/create", get(shows::create_form).post(shows::create))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(error::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::map_response(error::render_error_pages)),
        )
        .with_state(state)
}

pub async fn start(
    host: &str,
    port: u16,
    database: Database,
    config: Config,
) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: Arc::new(database),
        config,
        clock: Arc::new(SystemClock),
    });

    let app = router(app_state);

    let address = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| eyre!("Failed to bind to {}", address))?;

    tracing::info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}
