//! Route handlers: the upload form and the conversion endpoint.
//!
//! The conversion handler owns everything the pipeline deliberately does
//! not: filtering out parts with empty filenames, enforcing the
//! file-count cap, and translating the [`ConversionReport`] into an HTTP
//! response (redirect-with-message on total failure, ZIP attachment on
//! any success). Status messages travel as query parameters on the
//! redirect back to `/`; a partial-failure warning on a successful
//! download rides along in the `X-Conversion-Warning` header, since an
//! attachment response has no page to show it on.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::convert::convert_batch;
use crate::output::UploadEntry;
use crate::server::error::ServerError;
use crate::server::AppState;

/// The multipart field name carrying the uploaded files.
const UPLOAD_FIELD: &str = "images";

// ── GET / ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct IndexParams {
    /// Status message carried over from a redirect.
    pub message: Option<String>,
    /// `"error"` or `"warning"`; anything else is treated as error.
    pub kind: Option<String>,
}

/// Render the upload form, with the redirected status message if any.
pub async fn index(Query(params): Query<IndexParams>) -> Html<String> {
    let banner = match params.message.as_deref() {
        Some(msg) if !msg.is_empty() => {
            let class = match params.kind.as_deref() {
                Some("warning") => "warning",
                _ => "error",
            };
            // Failure reasons are newline-joined; keep them on separate lines.
            let text = escape_html(msg).replace('\n', "<br>");
            format!("<p class=\"{class}\">{text}</p>")
        }
        _ => String::new(),
    };
    Html(INDEX_TEMPLATE.replace("<!--BANNER-->", &banner))
}

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>JPEG to WebP converter</title>
<style>
body { font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }
.error { color: #b00020; white-space: pre-line; }
.warning { color: #8a6d00; }
</style>
</head>
<body>
<h1>JPEG to WebP</h1>
<!--BANNER-->
<form action="/convert" method="post" enctype="multipart/form-data">
  <input type="file" name="images" accept=".jpg,.jpeg" multiple required>
  <button type="submit">Convert to WebP</button>
</form>
<p>Upload one or more JPG/JPEG images; you get back a ZIP of WebP files.</p>
</body>
</html>
"#;

// ── POST /convert ────────────────────────────────────────────────────────

/// Accept a multipart upload, run the conversion batch, and respond with
/// either a redirect (nothing converted) or a ZIP attachment.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    debug!("received conversion request");

    // Buffer every qualifying part. Multipart streams are not seekable,
    // and the pipeline wants whole byte slices anyway.
    let mut entries: Vec<UploadEntry> = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_err)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        if filename.is_empty() {
            // An empty file input still submits one nameless part.
            continue;
        }
        let bytes = field.bytes().await.map_err(map_multipart_err)?;
        debug!(file = %filename, bytes = bytes.len(), "buffered upload");
        entries.push(UploadEntry::new(filename, bytes.to_vec()));
    }

    if entries.is_empty() {
        return Ok(
            redirect_with_message("Please choose at least one JPG/JPEG image.", "error")
                .into_response(),
        );
    }

    if entries.len() > state.config.max_files {
        let msg = format!(
            "Too many files: received {}, the limit is {}.",
            entries.len(),
            state.config.max_files
        );
        return Ok(redirect_with_message(&msg, "error").into_response());
    }

    // The encode stage is CPU-bound; keep it off the async executor.
    let report = tokio::task::spawn_blocking(move || convert_batch(&entries))
        .await
        .map_err(|e| ServerError::Internal(format!("conversion task failed: {e}")))??;

    if report.is_total_failure() {
        let msg = if report.failures.is_empty() {
            "Unable to convert the uploads.".to_string()
        } else {
            report.failure_messages().join("\n")
        };
        return Ok(redirect_with_message(&msg, "error").into_response());
    }

    info!(
        converted = report.successes.len(),
        skipped = report.failures.len(),
        "serving ZIP download"
    );

    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"webp-conversion-{stamp}.zip\""),
        );

    if let Some(warning) = report.warning() {
        if let Ok(value) = HeaderValue::from_str(&warning) {
            response = response.header("x-conversion-warning", value);
        }
    }

    response
        .body(Body::from(report.archive))
        .map_err(|e| ServerError::Internal(format!("response build failed: {e}")))
}

// ── helpers ──────────────────────────────────────────────────────────────

/// Redirect back to the form with a status message in the query string.
fn redirect_with_message(message: &str, kind: &str) -> Redirect {
    Redirect::to(&format!(
        "/?message={}&kind={}",
        urlencoding::encode(message),
        kind
    ))
}

/// Map a multipart read error to our taxonomy. Axum signals a body over
/// the `DefaultBodyLimit` through the field stream, so the 413 case
/// surfaces here rather than as an extractor rejection.
fn map_multipart_err(e: MultipartError) -> ServerError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge
    } else {
        ServerError::BadRequest(format!("Failed to read multipart field: {e}"))
    }
}

/// Minimal HTML escaping for text interpolated into our pages.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
