//! Filename sanitisation and the extension gate.
//!
//! Upload filenames are attacker-controlled and end up as ZIP entry
//! names, so they are flattened to a safe ASCII subset before anything
//! else looks at them: path separators become word breaks, whitespace
//! runs collapse to a single `_`, and every character outside
//! `[A-Za-z0-9_.-]` is dropped. `../../etc/passwd` sanitizes to
//! `etc_passwd`, never to something a naive extractor would follow.
//!
//! The extension gate is deliberately dumb: only `.jpg` and `.jpeg`
//! (case-insensitive) pass. Content sniffing happens later, at decode
//! time; this stage is purely about what the user *claimed* to upload.

/// Extensions accepted for conversion, lowercase, without the dot.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Name substituted when sanitisation leaves an empty string.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Flatten an untrusted filename to a safe ASCII form.
///
/// May return an empty string (e.g. for `"???"` or a name made entirely
/// of path separators); callers substitute [`UNKNOWN_NAME`] for display.
pub fn sanitize_filename(raw: &str) -> String {
    // Path separators act as word breaks, like any other whitespace.
    let spaced: String = raw
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    filtered.trim_matches(['.', '_']).to_string()
}

/// The display name for a sanitized filename: the name itself, or
/// [`UNKNOWN_NAME`] when empty.
pub fn display_name(sanitized: &str) -> &str {
    if sanitized.is_empty() {
        UNKNOWN_NAME
    } else {
        sanitized
    }
}

/// The filename minus its final extension, like `Path::file_stem` on an
/// already-sanitized name. `archive.tar.jpg` → `archive.tar`.
pub fn stem(sanitized: &str) -> &str {
    match sanitized.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => sanitized,
    }
}

/// Whether the sanitized name carries an allowed extension.
///
/// Case-insensitive; a name with no extension at all is rejected.
pub fn has_allowed_extension(sanitized: &str) -> bool {
    match sanitized.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
