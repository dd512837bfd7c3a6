use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::AppConfig;
use crate::models::content;

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing or malformed content
/// files, and aborts if critical dependencies are absent.
pub fn run(config: &AppConfig) {
    info!("Muhely boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    let required_dirs = [
        config.content_dir.as_str(),
        config.images_dir.as_str(),
        config.static_dir.as_str(),
    ];
    for dir in required_dirs {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Content files parse as JSON ─────────────────
    for file in content::CONTENT_FILES {
        let path = Path::new(&config.content_dir).join(file);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
                    warn!("  Content file is not valid JSON: {} (defaults will be used)", path.display());
                    warnings += 1;
                }
            }
            Err(_) => {
                warn!("  Missing content file: {} (defaults will be used)", path.display());
                warnings += 1;
            }
        }
    }

    // ── 3. Draft directory writable ─────────────────────
    if let Some(parent) = Path::new(&config.draft_path).parent() {
        if parent.exists() {
            let test_file = parent.join(".write_test");
            match fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = fs::remove_file(&test_file);
                }
                Err(e) => {
                    warn!("  Draft directory not writable: {} (draft edits will fail)", e);
                    warnings += 1;
                }
            }
        }
    }

    // ── 4. Admin key / repository configuration ─────────
    if config.admin_key.is_empty() {
        warn!("  ADMIN_KEY not set — privileged endpoints will refuse every request");
        warnings += 1;
    }
    if config.github_token.is_empty() || config.github_repo.is_empty() {
        warn!("  GITHUB_TOKEN/GITHUB_REPO not set — saves will fail against the content repository");
        warnings += 1;
    }

    // ── 5. muhely.toml exists ───────────────────────────
    if !Path::new("muhely.toml").exists() {
        warn!("  muhely.toml not found — using default config");
        warnings += 1;
    }

    // ── Summary ─────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
