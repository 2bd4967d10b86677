//! Input and output records for a conversion batch.
//!
//! [`UploadEntry`] is what the caller hands the pipeline: one named blob
//! per uploaded file, already buffered in memory (multipart transport
//! streams are not seekable, so the HTTP layer buffers them first).
//! [`ConversionReport`] is what comes back: ordered successes, ordered
//! failures, and a finished ZIP archive. Everything is request-scoped;
//! nothing outlives the response.

use crate::error::FileError;

/// One uploaded file: the client-supplied filename plus its raw bytes.
///
/// The pipeline only reads it; ownership stays with the caller for the
/// duration of one request.
#[derive(Debug, Clone)]
pub struct UploadEntry {
    /// The original (untrusted) filename from the form field.
    pub filename: String,
    /// The complete upload body.
    pub bytes: Vec<u8>,
}

impl UploadEntry {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Result of converting one batch of uploads.
///
/// Invariants upheld by [`crate::convert::convert_batch`]:
/// * every name in `successes` ends in `.webp` and has exactly one
///   corresponding archive entry, written in the same order;
/// * `successes` and `failures` each preserve input order;
/// * no upload appears in both lists;
/// * `archive` is a complete, readable ZIP container even when empty.
#[derive(Debug)]
pub struct ConversionReport {
    /// Output filenames of successful conversions, in input order.
    pub successes: Vec<String>,
    /// Per-file failures, in input order.
    pub failures: Vec<FileError>,
    /// The finished ZIP archive containing every success.
    pub archive: Vec<u8>,
}

impl ConversionReport {
    /// True when not a single upload converted.
    pub fn is_total_failure(&self) -> bool {
        self.successes.is_empty()
    }

    /// Human-readable failure reasons, one per failed upload, in order.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failures.iter().map(|e| e.to_string()).collect()
    }

    /// The `Converted N file(s). Skipped M issue(s).` warning shown when a
    /// download succeeds but some uploads were skipped. `None` when there
    /// is nothing to warn about.
    pub fn warning(&self) -> Option<String> {
        if self.successes.is_empty() || self.failures.is_empty() {
            return None;
        }
        Some(format!(
            "Converted {} file(s). Skipped {} issue(s).",
            self.successes.len(),
            self.failures.len()
        ))
    }
}
