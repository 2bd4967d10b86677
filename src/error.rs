//! Error types for the jpeg2webp library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] — **Fatal**: the batch cannot proceed at all
//!   (the ZIP writer itself failed, invalid configuration). Returned as
//!   `Err(ConvertError)` from [`crate::convert::convert_batch`].
//!
//! * [`FileError`] — **Non-fatal**: a single upload failed (wrong
//!   extension, unparsable bytes) but the rest of the batch is fine.
//!   Collected into [`crate::output::ConversionReport::failures`] so
//!   callers see partial success rather than losing the whole batch to
//!   one bad file.
//!
//! The `Display` impls of [`FileError`] are load-bearing: they are the
//! exact per-file messages shown to the user, `"<name>: unsupported file
//! type"` and `"<name>: <diagnostic>"`.

use thiserror::Error;

/// All fatal errors returned by the jpeg2webp library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::output::ConversionReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The ZIP writer failed while adding an entry or finalising the
    /// archive. This aborts the whole batch: a half-written central
    /// directory is not salvageable.
    #[error("Failed to assemble ZIP archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O error on the in-memory archive buffer.
    #[error("Archive buffer error: {0}")]
    ArchiveIo(#[from] std::io::Error),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single uploaded file.
///
/// Stored in [`crate::output::ConversionReport::failures`]; the batch
/// continues past it. `name` is always the sanitized filename, or the
/// literal `Unknown` when sanitisation left nothing.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// Extension is not `.jpg`/`.jpeg`, or the filename sanitized to
    /// nothing usable.
    #[error("{name}: unsupported file type")]
    UnsupportedType { name: String },

    /// The bytes could not be parsed as an image.
    #[error("{name}: {detail}")]
    Decode { name: String, detail: String },

    /// The decoded image could not be re-encoded as WebP.
    #[error("{name}: {detail}")]
    Encode { name: String, detail: String },
}

impl FileError {
    /// The sanitized display name the error is attributed to.
    pub fn name(&self) -> &str {
        match self {
            FileError::UnsupportedType { name } => name,
            FileError::Decode { name, .. } => name,
            FileError::Encode { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_display() {
        let e = FileError::UnsupportedType {
            name: "note.txt".into(),
        };
        assert_eq!(e.to_string(), "note.txt: unsupported file type");
    }

    #[test]
    fn unsupported_type_display_unknown() {
        let e = FileError::UnsupportedType {
            name: "Unknown".into(),
        };
        assert_eq!(e.to_string(), "Unknown: unsupported file type");
    }

    #[test]
    fn decode_display_carries_diagnostic() {
        let e = FileError::Decode {
            name: "a.jpg".into(),
            detail: "unsupported image format".into(),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("a.jpg: "), "got: {msg}");
        assert!(msg.contains("unsupported image format"));
    }

    #[test]
    fn file_error_name_accessor() {
        let e = FileError::Encode {
            name: "b.jpg".into(),
            detail: "oom".into(),
        };
        assert_eq!(e.name(), "b.jpg");
    }
}
