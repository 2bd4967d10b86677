//! # jpeg2webp
//!
//! Batch-convert uploaded JPEG images to WebP and hand back a ZIP of the
//! results.
//!
//! ## Why this crate?
//!
//! Re-encoding a folder of JPEGs as WebP is a one-liner per file with
//! the right tools installed, but friction in practice: install an
//! encoder, script the loop, collect the output. This crate wraps the
//! whole exercise in a single-page web service — drop files on a form,
//! get a ZIP back — with a library core that can be driven without the
//! HTTP layer at all.
//!
//! ## Pipeline Overview
//!
//! ```text
//! uploads
//!  │
//!  ├─ 1. Sanitize  flatten the filename, gate on .jpg/.jpeg
//!  ├─ 2. Decode    sniff and parse the bytes (content wins over name)
//!  ├─ 3. Encode    lossy WebP, quality 95 / method 6, deterministic
//!  └─ 4. Archive   append to an in-memory ZIP, stored entries
//! ```
//!
//! Failures are per-file: one corrupt upload is reported and skipped,
//! the rest of the batch still converts. Only a fault in the archive
//! itself aborts a batch.
//!
//! ## Quick Start
//!
//! ```rust
//! use jpeg2webp::{convert_batch, UploadEntry};
//!
//! # fn main() -> Result<(), jpeg2webp::ConvertError> {
//! let entries = vec![UploadEntry::new("photo.jpg", std::fs::read("photo.jpg").unwrap_or_default())];
//! let report = convert_batch(&entries)?;
//! println!("converted: {:?}", report.successes);
//! for failure in &report.failures {
//!     eprintln!("skipped — {failure}");
//! }
//! std::fs::write("out.zip", &report.archive).ok();
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `jpeg2webp` server binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! jpeg2webp = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::ServerConfig;
pub use convert::{convert_batch, convert_image};
pub use error::{ConvertError, FileError};
pub use output::{ConversionReport, UploadEntry};
