use chrono::{DateTime, Utc};
use std::path::Path;

/// Extensions accepted for gallery uploads. Anything else is renamed
/// to jpg rather than rejected.
const SAFE_EXTS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Generated upload name: millisecond timestamp plus a normalized
/// extension. Timestamps keep names unique under the single-admin
/// usage pattern without any server-side counter.
pub fn upload_filename(original_name: &str, now: DateTime<Utc>) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let safe_ext = if SAFE_EXTS.contains(&ext.as_str()) {
        ext
    } else {
        "jpg".to_string()
    };
    format!("{}.{}", now.timestamp_millis(), safe_ext)
}

/// Repository path for an uploaded image: one subpath per category
/// under the fixed image root.
pub fn upload_path(category: &str, original_name: &str, now: DateTime<Utc>) -> String {
    format!("images/{}/{}", category, upload_filename(original_name, now))
}
