//! Unified error handling for the site

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Application error types.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Html(error_page(status, &message))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log full error chain for debugging, return sanitized message to client
        tracing::error!("Internal error: {:?}", err);
        AppError::Internal(err.to_string())
    }
}

/// Minimal HTML error page; this server renders pages, not a JSON API.
fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\" />\
         <title>{status}</title></head>\
         <body><h1>{status}</h1><p>{message}</p></body></html>",
        status = status,
        message = crate::render::html_escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_escapes_the_message() {
        let page = error_page(StatusCode::INTERNAL_SERVER_ERROR, "bad <script> input");
        assert!(page.contains("bad &lt;script&gt; input"));
        assert!(page.contains("500"));
    }
}
