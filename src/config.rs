//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for the jpeg2webp server.
///
/// Every field has a default so the server works out-of-the-box without
/// any environment variables set. The WebP encoder parameters are *not*
/// here on purpose: they are fixed constants in
/// [`crate::pipeline::encode`] so that identical input always produces
/// identical output.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to bind on `0.0.0.0` (env `PORT`, default 5008).
    pub port: u16,

    /// Maximum number of files accepted per request
    /// (env `JPEG2WEBP_MAX_FILES`, default 200).
    pub max_files: usize,

    /// Maximum total request body size in bytes
    /// (env `JPEG2WEBP_MAX_BODY_BYTES`, default 64 MiB). Enforced before
    /// the pipeline runs; exceeding it yields HTTP 413.
    pub max_body_bytes: usize,

    /// `tracing` filter string (env `JPEG2WEBP_LOG`, default `"info"`).
    pub log_filter: String,
}

/// Default request-body cap: 64 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// At most this many files per request.
pub const DEFAULT_MAX_FILES: usize = 200;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5008,
            max_files: DEFAULT_MAX_FILES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_filter: "info".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Build a [`ServerConfig`] from environment variables, falling back
    /// to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT", 5008),
            max_files: parse_env("JPEG2WEBP_MAX_FILES", DEFAULT_MAX_FILES),
            max_body_bytes: parse_env("JPEG2WEBP_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            log_filter: env_or("JPEG2WEBP_LOG", "info"),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
