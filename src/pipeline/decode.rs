//! Image decoding: upload bytes → [`DynamicImage`].
//!
//! The decoder sniffs the actual content instead of trusting the
//! extension, so a PNG that slipped past the `.jpg` gate still decodes
//! and converts, while a zero-byte or corrupt upload fails here with a
//! real diagnostic. That diagnostic text ends up verbatim in the
//! per-file failure message, so the `image` crate's error `Display` is
//! passed through untouched.

use image::{DynamicImage, ImageError, ImageReader};
use std::io::Cursor;
use tracing::debug;

/// Decode one upload's bytes into a [`DynamicImage`].
///
/// The orchestrator wraps the error into a
/// [`crate::error::FileError::Decode`] carrying the sanitized filename.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()?;

    debug!(
        width = img.width(),
        height = img.height(),
        bytes = bytes.len(),
        "decoded upload"
    );
    Ok(img)
}
