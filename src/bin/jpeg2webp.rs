//! Server binary for jpeg2webp.
//!
//! A thin shim over the library crate that maps CLI flags and
//! environment variables to a `ServerConfig` and runs the HTTP server.

use anyhow::{Context, Result};
use clap::Parser;
use jpeg2webp::{server, ServerConfig};
use std::io;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default port (5008)
  jpeg2webp

  # Serve on port 8080 with debug logs
  jpeg2webp --port 8080 --verbose

  # Raise the per-request file cap
  jpeg2webp --max-files 500

ENVIRONMENT VARIABLES:
  PORT                      Listen port (default 5008)
  JPEG2WEBP_MAX_FILES       Max files per request (default 200)
  JPEG2WEBP_MAX_BODY_BYTES  Max request body in bytes (default 64 MiB)
  JPEG2WEBP_LOG             tracing filter, e.g. "debug,tower_http=warn"

The service exposes GET / (upload form) and POST /convert (multipart
field "images", repeated). Successful conversions come back as a ZIP
attachment named webp-conversion-<UTC timestamp>.zip.
"#;

/// Convert uploaded JPEG images to WebP, zipped for download.
#[derive(Parser, Debug)]
#[command(
    name = "jpeg2webp",
    version,
    about = "HTTP service converting JPEG uploads to a ZIP of WebP images",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// TCP port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 5008)]
    port: u16,

    /// Maximum number of files accepted per request.
    #[arg(long, env = "JPEG2WEBP_MAX_FILES", default_value_t = 200)]
    max_files: usize,

    /// Maximum request body size in bytes.
    #[arg(long, env = "JPEG2WEBP_MAX_BODY_BYTES", default_value_t = 64 * 1024 * 1024)]
    max_body_bytes: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Build config: flags (and their env fallbacks) over defaults ──
    let config = ServerConfig {
        port: cli.port,
        max_files: cli.max_files,
        max_body_bytes: cli.max_body_bytes,
        ..ServerConfig::from_env()
    };

    // ── Logging setup ────────────────────────────────────────────────
    // RUST_LOG wins, then --quiet/--verbose, then JPEG2WEBP_LOG.
    let filter = if cli.quiet {
        "error".to_owned()
    } else if cli.verbose {
        "debug".to_owned()
    } else {
        config.log_filter.clone()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.port,
        max_files = config.max_files,
        max_body_bytes = config.max_body_bytes,
        "jpeg2webp starting"
    );

    server::serve(config).await.context("server failed")?;
    Ok(())
}
