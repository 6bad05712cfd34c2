use axum::http::StatusCode;

use super::{escape, layout};

pub fn page(status: StatusCode) -> String {
    let (title, message) = match status {
        StatusCode::BAD_REQUEST => ("Bad Request", "The request could not be understood."),
        StatusCode::UNAUTHORIZED => ("Unauthorized", "You need to sign in to see this page."),
        StatusCode::FORBIDDEN => ("Forbidden", "You are not allowed to see this page."),
        StatusCode::NOT_FOUND => ("Not Found", "Sorry, that page does not exist."),
        StatusCode::METHOD_NOT_ALLOWED => (
            "Invalid Method",
            "That action is not supported on this page.",
        ),
        StatusCode::CONFLICT => ("Duplicate Resource", "That record already exists."),
        s if s.is_client_error() => ("Bad Request", "The request could not be understood."),
        _ => ("Server Error", "Something went wrong. Please try again later."),
    };

    let body = format!(
        r#"<div class="error-page">
    <h1>{code}</h1>
    <h2>{title}</h2>
    <p>{message}</p>
    <p><a href="/">Back to home</a></p>
</div>"#,
        code = status.as_u16(),
        title = escape(title),
        message = escape(message),
    );

    layout(title, &[], &body)
}
