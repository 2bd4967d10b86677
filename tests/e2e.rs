//! End-to-end tests for jpeg2webp.
//!
//! The pipeline tests drive [`convert_batch`] directly with synthesised
//! JPEG bytes (no fixtures on disk — the `image` crate writes the test
//! inputs). The HTTP tests drive the full axum router in-process via
//! `tower::ServiceExt::oneshot` with hand-built multipart bodies.

use std::io::{Cursor, Read};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use zip::ZipArchive;

use jpeg2webp::{convert_batch, server, ServerConfig, UploadEntry};

// ── Test helpers ─────────────────────────────────────────────────────────

fn jpeg_bytes(w: u32, h: u32) -> Vec<u8> {
    use image::{DynamicImage, Rgb, RgbImage};
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 120])
    }));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .expect("jpeg encode");
    buf
}

fn read_entry(archive_bytes: &[u8], index: usize) -> (String, Vec<u8>) {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes)).expect("valid zip");
    let mut entry = archive.by_index(index).expect("entry exists");
    let name = entry.name().to_string();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).expect("entry readable");
    (name, content)
}

const BOUNDARY: &str = "jpeg2webp-test-boundary";

/// Build a `multipart/form-data` body with one `images` part per file.
fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"images\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(files: &[(&str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/convert")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(files)))
        .expect("request builds")
}

fn test_app() -> axum::Router {
    server::app(ServerConfig::default())
}

// ── Pipeline scenarios ───────────────────────────────────────────────────

#[test]
fn mixed_batch_uppercase_jpg_and_text_file() {
    let entries = vec![
        UploadEntry::new("photo.JPG", jpeg_bytes(32, 24)),
        UploadEntry::new("note.txt", b"just text".to_vec()),
    ];

    let report = convert_batch(&entries).expect("batch must not abort");

    assert_eq!(report.successes, vec!["photo.webp"]);
    assert_eq!(
        report.failure_messages(),
        vec!["note.txt: unsupported file type"]
    );

    let (name, content) = read_entry(&report.archive, 0);
    assert_eq!(name, "photo.webp");

    let img = image::load_from_memory(&content).expect("entry decodes");
    assert_eq!(
        image::guess_format(&content).expect("recognised format"),
        image::ImageFormat::WebP
    );
    assert_eq!((img.width(), img.height()), (32, 24), "dimensions preserved");
}

#[test]
fn corrupt_jpg_fails_with_decode_diagnostic() {
    let entries = vec![UploadEntry::new("a.jpg", b"garbage bytes".to_vec())];
    let report = convert_batch(&entries).unwrap();

    assert!(report.is_total_failure());
    assert_eq!(report.failures.len(), 1);
    let msg = report.failure_messages().remove(0);
    assert!(msg.starts_with("a.jpg: "), "got: {msg}");
    assert!(msg.len() > "a.jpg: ".len(), "diagnostic must not be empty");
}

#[test]
fn counts_match_for_mixed_valid_and_invalid() {
    let entries = vec![
        UploadEntry::new("one.jpg", jpeg_bytes(8, 8)),
        UploadEntry::new("bad.jpg", b"nope".to_vec()),
        UploadEntry::new("two.jpeg", jpeg_bytes(8, 8)),
        UploadEntry::new("skip.png", jpeg_bytes(8, 8)),
        UploadEntry::new("three.jpg", jpeg_bytes(8, 8)),
    ];
    let report = convert_batch(&entries).unwrap();

    assert_eq!(report.successes, vec!["one.webp", "two.webp", "three.webp"]);
    assert_eq!(report.failures.len(), 2);

    let archive = ZipArchive::new(Cursor::new(report.archive)).unwrap();
    assert_eq!(archive.len(), 3, "exactly one entry per success");
}

#[test]
fn every_success_has_a_matching_webp_entry() {
    let entries = vec![
        UploadEntry::new("x.jpg", jpeg_bytes(5, 9)),
        UploadEntry::new("y dir/z.jpeg", jpeg_bytes(6, 6)),
    ];
    let report = convert_batch(&entries).unwrap();

    let mut archive = ZipArchive::new(Cursor::new(report.archive.clone())).unwrap();
    for name in &report.successes {
        let mut entry = archive.by_name(name).expect("success name present in zip");
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(
            image::guess_format(&content).unwrap(),
            image::ImageFormat::WebP
        );
    }
}

#[test]
fn duplicate_stems_produce_two_entries() {
    // "pic.jpg" and "pic.jpeg" both become "pic.webp": both are written,
    // a standard reader takes the last on extraction.
    let entries = vec![
        UploadEntry::new("pic.jpg", jpeg_bytes(4, 4)),
        UploadEntry::new("pic.jpeg", jpeg_bytes(12, 12)),
    ];
    let report = convert_batch(&entries).unwrap();

    assert_eq!(report.successes, vec!["pic.webp", "pic.webp"]);
    let archive = ZipArchive::new(Cursor::new(report.archive)).unwrap();
    assert_eq!(archive.len(), 2);
}

#[test]
fn conversion_is_idempotent() {
    let input = jpeg_bytes(20, 10);
    let entries = vec![UploadEntry::new("p.jpg", input)];

    let first = convert_batch(&entries).unwrap();
    let second = convert_batch(&entries).unwrap();

    let (_, a) = read_entry(&first.archive, 0);
    let (_, b) = read_entry(&second.archive, 0);
    assert_eq!(a, b, "same input bytes must yield identical WebP bytes");
}

#[test]
fn empty_batch_yields_valid_empty_zip() {
    let report = convert_batch(&[]).unwrap();
    assert!(report.successes.is_empty());
    assert!(report.failures.is_empty());
    let archive = ZipArchive::new(Cursor::new(report.archive)).unwrap();
    assert_eq!(archive.len(), 0);
}

// ── HTTP layer ───────────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_upload_form() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("name=\"images\""));
    assert!(html.contains("action=\"/convert\""));
}

#[tokio::test]
async fn index_shows_redirected_message_escaped() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/?message=%3Cb%3Eboom%3C%2Fb%3E&kind=error")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("&lt;b&gt;boom&lt;/b&gt;"));
    assert!(!html.contains("<b>boom</b>"));
}

#[tokio::test]
async fn convert_without_files_redirects_with_message() {
    let response = test_app().oneshot(multipart_request(&[])).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("/?message="));
    assert!(location.contains("choose%20at%20least%20one"), "got: {location}");
}

#[tokio::test]
async fn convert_valid_jpeg_returns_zip_attachment() {
    let jpeg = jpeg_bytes(16, 16);
    let response = test_app()
        .oneshot(multipart_request(&[("photo.jpg", &jpeg)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        disposition.starts_with("attachment; filename=\"webp-conversion-"),
        "got: {disposition}"
    );
    assert!(disposition.ends_with(".zip\""));
    assert!(
        response.headers().get("x-conversion-warning").is_none(),
        "no warning when nothing was skipped"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let mut archive = ZipArchive::new(Cursor::new(body.to_vec())).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.by_index(0).unwrap().name(), "photo.webp");
}

#[tokio::test]
async fn convert_partial_failure_sets_warning_header() {
    let jpeg = jpeg_bytes(10, 10);
    let response = test_app()
        .oneshot(multipart_request(&[
            ("photo.jpg", jpeg.as_slice()),
            ("note.txt", b"text".as_slice()),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-conversion-warning")
            .unwrap()
            .to_str()
            .unwrap(),
        "Converted 1 file(s). Skipped 1 issue(s)."
    );
}

#[tokio::test]
async fn convert_total_failure_redirects_with_reasons() {
    let response = test_app()
        .oneshot(multipart_request(&[("a.jpg", b"corrupt".as_slice())]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.contains("a.jpg"), "got: {location}");
    assert!(location.ends_with("&kind=error"));
}

#[tokio::test]
async fn convert_enforces_file_count_cap() {
    let app = server::app(ServerConfig {
        max_files: 2,
        ..ServerConfig::default()
    });

    let jpeg = jpeg_bytes(4, 4);
    let files: Vec<(&str, &[u8])> = vec![
        ("a.jpg", jpeg.as_slice()),
        ("b.jpg", jpeg.as_slice()),
        ("c.jpg", jpeg.as_slice()),
    ];
    let response = app.oneshot(multipart_request(&files)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.contains("Too%20many%20files"), "got: {location}");
}

#[tokio::test]
async fn oversized_body_rejected_with_413() {
    let app = server::app(ServerConfig {
        max_body_bytes: 1024,
        ..ServerConfig::default()
    });

    let big = vec![0u8; 8 * 1024];
    let response = app
        .oneshot(multipart_request(&[("big.jpg", big.as_slice())]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn parts_with_empty_filename_are_filtered_out() {
    // An empty file input submits a nameless part; it must not count as
    // a qualifying file.
    let response = test_app()
        .oneshot(multipart_request(&[("", b"".as_slice())]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.contains("choose%20at%20least%20one"));
}
