//! Unified HTTP error type.
//!
//! Handlers return `Result<T, ServerError>`; the `IntoResponse` impl
//! turns errors into minimal HTML error pages with the right status
//! code.
//!
//! **Security note:** internal faults are logged with full detail but
//! only a generic page is returned to the caller, so diagnostics never
//! leak to clients. Per-file conversion failures are *not* errors at
//! this level — they travel inside the redirect message.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::error::ConvertError;

/// Errors that abort a request before or outside the conversion loop.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Request body exceeded the configured limit.
    #[error("request body too large")]
    PayloadTooLarge,

    /// The multipart body was malformed or unreadable.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything else. Logged in full, rendered as a generic 500 page.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                error_page(
                    "Upload too large",
                    "The upload exceeds the allowed request size. \
                     Try fewer or smaller images.",
                ),
            ),
            ServerError::BadRequest(m) => {
                (StatusCode::BAD_REQUEST, error_page("Bad request", m))
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_page(
                        "Something went wrong",
                        "An unexpected error occurred. Please try again.",
                    ),
                )
            }
        };
        (status, Html(body)).into_response()
    }
}

impl From<ConvertError> for ServerError {
    fn from(e: ConvertError) -> Self {
        // Archive faults are transport-level problems, never a property
        // of one upload; surface them as the generic 500.
        ServerError::Internal(e.to_string())
    }
}

fn error_page(title: &str, detail: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><title>{title}</title></head>\
         <body><h1>{title}</h1><p>{detail}</p>\
         <p><a href=\"/\">Back to the upload form</a></p></body></html>",
        title = super::routes::escape_html(title),
        detail = super::routes::escape_html(detail),
    )
}
