//! In-memory ZIP assembly.
//!
//! The archive lives entirely in a `Vec<u8>` behind a cursor; nothing is
//! written to disk. Entries are stored uncompressed — the payloads are
//! freshly encoded WebP, and deflating already-compressed image data
//! buys nothing.
//!
//! Duplicate entry names are written as-is. Two uploads that sanitize to
//! the same stem yield two entries with the same name, and standard ZIP
//! readers resolve that to the last entry on extraction.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ConvertError;

/// Incrementally builds the response ZIP for one request.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Append one stored entry under `name`.
    pub fn add_entry(&mut self, name: &str, bytes: &[u8]) -> Result<(), ConvertError> {
        let options =
            FileOptions::default().compression_method(CompressionMethod::Stored);
        self.writer.start_file(name, options)?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Finalise the central directory and hand back the raw archive.
    ///
    /// An [`ArchiveBuilder`] that never saw an entry still finishes into
    /// a valid (empty) ZIP container.
    pub fn finish(mut self) -> Result<Vec<u8>, ConvertError> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
