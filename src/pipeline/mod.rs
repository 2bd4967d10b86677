//! Pipeline stages for JPEG-to-WebP conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different WebP backend) without touching the
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! sanitize ──▶ decode ──▶ encode ──▶ archive
//! (filename)   (sniff)    (libwebp)  (in-memory ZIP)
//! ```
//!
//! 1. [`sanitize`] — flatten the untrusted filename, gate on extension
//! 2. [`decode`]   — parse upload bytes into pixels (content-sniffed)
//! 3. [`encode`]   — re-encode as lossy WebP with fixed parameters
//! 4. [`archive`]  — append successes to the response ZIP

pub mod archive;
pub mod decode;
pub mod encode;
pub mod sanitize;
