use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::http_server::views;
use crate::services::error::ServiceError;

/// Errors a page handler can end with. Rendered as an HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(ServiceError),
    #[error("{0}")]
    Internal(ServiceError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        if matches!(err, ServiceError::NotFound { .. }) {
            AppError::NotFound(err)
        } else {
            AppError::Internal(err)
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(err) => tracing::debug!("{err}"),
            AppError::Internal(err) => tracing::error!("{err:?}"),
        }
        (status, Html(views::errors::page(status))).into_response()
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(views::errors::page(StatusCode::NOT_FOUND)),
    )
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

/// Replace plain-text error bodies produced by axum (wrong method, extractor
/// rejections) with the HTML error page for the same status.
pub async fn render_error_pages(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_html(&response) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    Response::from_parts(parts, Body::from(views::errors::page(status)))
}
