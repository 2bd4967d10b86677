//! Batch conversion entry points.
//!
//! [`convert_batch`] is the orchestrator: it walks the uploads in order,
//! funnels every per-file problem into the failure list, and only ever
//! returns `Err` for faults in the archive itself. One bad upload never
//! aborts the batch.
//!
//! Callers are expected to pre-filter entries with empty filenames and
//! to enforce their own file-count cap before calling in; the pipeline
//! happily processes whatever it is given, including an empty slice
//! (which yields a valid empty ZIP).

use tracing::{debug, info, warn};

use crate::error::{ConvertError, FileError};
use crate::output::{ConversionReport, UploadEntry};
use crate::pipeline::{archive::ArchiveBuilder, decode, encode, sanitize};

/// Convert a batch of uploads into a [`ConversionReport`].
///
/// Entries are processed strictly in input order. For each entry:
/// filename sanitisation and the extension gate run first, then decode
/// and WebP re-encode; the output lands in the ZIP under
/// `<stem>.webp`. Any per-file failure is recorded and the loop moves
/// on.
///
/// # Errors
/// Returns `Err(ConvertError)` only when the ZIP writer itself fails —
/// a transport-level fault, not a property of any single upload.
pub fn convert_batch(entries: &[UploadEntry]) -> Result<ConversionReport, ConvertError> {
    info!(files = entries.len(), "starting conversion batch");

    let mut successes: Vec<String> = Vec::new();
    let mut failures: Vec<FileError> = Vec::new();
    let mut builder = ArchiveBuilder::new();

    for entry in entries {
        // ── Stage 1: sanitize + extension gate ───────────────────────
        let name = sanitize::sanitize_filename(&entry.filename);
        if name.is_empty() || !sanitize::has_allowed_extension(&name) {
            let err = FileError::UnsupportedType {
                name: sanitize::display_name(&name).to_string(),
            };
            warn!(file = %entry.filename, "rejected: {err}");
            failures.push(err);
            continue;
        }

        // ── Stage 2+3: decode, re-encode ─────────────────────────────
        let webp_bytes = match convert_image(&name, &entry.bytes) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(file = %name, "conversion failed: {err}");
                failures.push(err);
                continue;
            }
        };

        // ── Stage 4: archive ─────────────────────────────────────────
        let output_name = format!("{}.webp", sanitize::stem(&name));
        builder.add_entry(&output_name, &webp_bytes)?;
        debug!(
            file = %output_name,
            bytes_in = entry.bytes.len(),
            bytes_out = webp_bytes.len(),
            "converted"
        );
        successes.push(output_name);
    }

    let archive = builder.finish()?;
    info!(
        converted = successes.len(),
        skipped = failures.len(),
        archive_bytes = archive.len(),
        "conversion batch complete"
    );

    Ok(ConversionReport {
        successes,
        failures,
        archive,
    })
}

/// Convert one upload's bytes to WebP.
///
/// `name` is the already-sanitized filename, used only to attribute a
/// failure. Decoding sniffs the content; the image is normalised to
/// 3-channel RGB (alpha and palette modes are flattened) before the
/// lossy WebP encode with the fixed parameters in
/// [`crate::pipeline::encode`].
pub fn convert_image(name: &str, bytes: &[u8]) -> Result<Vec<u8>, FileError> {
    let img = decode::decode_image(bytes).map_err(|e| FileError::Decode {
        name: name.to_string(),
        detail: e.to_string(),
    })?;

    let rgb = img.to_rgb8();

    encode::encode_webp(&rgb).map_err(|detail| FileError::Encode {
        name: name.to_string(),
        detail,
    })
}
