//! WebP encoding: RGB pixels → lossy WebP bytes.
//!
//! Parameters are fixed, not configurable. Quality 95 keeps photographic
//! uploads visually identical to the JPEG source while still shrinking
//! them; method 6 is libwebp's slowest/highest-compression effort
//! setting, affordable because batches are small and request-scoped.
//! Lossless mode stays off: recompressing JPEG losslessly would *grow*
//! most files. With the parameters and encoder pinned, identical input
//! bytes always produce identical output bytes.

use image::RgbImage;
use webp::{Encoder, WebPConfig};

/// Lossy quality on libwebp's 0–100 scale.
pub const WEBP_QUALITY: f32 = 95.0;
/// Encoder effort, 0 (fast) to 6 (slowest, best compression).
pub const WEBP_METHOD: i32 = 6;

/// Encode an RGB8 image as lossy WebP with the fixed parameters above.
///
/// The error is a plain diagnostic string: libwebp's failure codes do
/// not implement `std::error::Error`, and the text goes straight into a
/// per-file failure message anyway.
pub fn encode_webp(img: &RgbImage) -> Result<Vec<u8>, String> {
    let mut config =
        WebPConfig::new().map_err(|_| "libwebp refused default encoder config".to_string())?;
    config.quality = WEBP_QUALITY;
    config.method = WEBP_METHOD;
    config.lossless = 0;

    let encoder = Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| format!("WebP encoding failed: {e:?}"))?;

    Ok(encoded.to_vec())
}
