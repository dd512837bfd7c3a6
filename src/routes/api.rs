use base64::Engine;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use chrono::Utc;

use crate::auth::{self, AdminKey, GateError};
use crate::config::AppConfig;
use crate::gallery;
use crate::images;
use crate::models::draft::DraftOverlay;
use crate::repo::{ContentRepo, RepoError};

type ApiError = (Status, Json<Value>);

/// Every privileged handler runs the gate first. Misconfiguration is
/// the server's fault (500); a bad or missing key is the caller's
/// (401). Nothing happens before the gate passes.
fn gate(config: &AppConfig, key: &AdminKey) -> Result<(), ApiError> {
    auth::check_key(config, &key.0).map_err(|e| match e {
        GateError::Unconfigured => (
            Status::InternalServerError,
            Json(json!({"error": e.to_string()})),
        ),
        GateError::Unauthorized => (Status::Unauthorized, Json(json!({"error": "Unauthorized"}))),
    })
}

// ── Ping ───────────────────────────────────────────────

#[get("/ping")]
pub fn ping(config: &State<AppConfig>, key: AdminKey) -> Result<Json<Value>, ApiError> {
    gate(config, &key)?;
    Ok(Json(json!({"ok": true})))
}

// ── Save (commit to the content repository) ────────────

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub path: Option<String>,
    #[serde(rename = "contentBase64")]
    pub content_base64: Option<String>,
    pub message: Option<String>,
}

/// Commit one file to the content repository. Read-for-revision then a
/// conditional write; a revision race comes back as 409 and the remote
/// content is left untouched. No retry — the operator re-saves.
#[post("/save", format = "json", data = "<body>")]
pub fn save(
    config: &State<AppConfig>,
    repo: &State<Arc<dyn ContentRepo>>,
    key: AdminKey,
    body: Json<SaveRequest>,
) -> Result<Json<Value>, ApiError> {
    gate(config, &key)?;

    let path = match body.path.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(bad_request("path/contentBase64 required")),
    };
    let encoded = match body.content_base64.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => return Err(bad_request("path/contentBase64 required")),
    };

    let content = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|_| bad_request("contentBase64 is not valid base64"))?;

    let message = body
        .message
        .clone()
        .unwrap_or_else(|| format!("Update {}", path));

    commit_response(path, repo.save(path, &content, &message))
}

/// Shared response shape for repository commits: `{ok, path, commit}`
/// on success, 409 on a revision conflict, 500 with provider detail on
/// any other remote failure.
fn commit_response(path: &str, result: Result<String, RepoError>) -> Result<Json<Value>, ApiError> {
    match result {
        Ok(revision) => {
            let commit = if revision.is_empty() {
                Value::Null
            } else {
                json!(revision)
            };
            Ok(Json(json!({"ok": true, "path": path, "commit": commit})))
        }
        Err(RepoError::Conflict) => Err((
            Status::Conflict,
            Json(json!({"error": RepoError::Conflict.to_string()})),
        )),
        Err(RepoError::Remote { message, details }) => Err((
            Status::InternalServerError,
            Json(json!({"error": message, "details": details})),
        )),
    }
}

// ── Image upload (commit into the gallery tree) ────────

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub category: Option<String>,
    pub filename: Option<String>,
    #[serde(rename = "contentBase64")]
    pub content_base64: Option<String>,
}

/// Commit an uploaded image under `images/<category>/`. The stored
/// name is generated server-side (timestamp + normalized extension);
/// the bytes are committed as-is, no transformation.
#[post("/upload", format = "json", data = "<body>")]
pub fn upload(
    config: &State<AppConfig>,
    repo: &State<Arc<dyn ContentRepo>>,
    key: AdminKey,
    body: Json<UploadRequest>,
) -> Result<Json<Value>, ApiError> {
    gate(config, &key)?;

    let category = match body.category.as_deref() {
        Some(c) if is_safe_category(c) => c,
        Some(_) => return Err(bad_request("category must be a plain folder name")),
        None => return Err(bad_request("category/contentBase64 required")),
    };
    let encoded = match body.content_base64.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => return Err(bad_request("category/contentBase64 required")),
    };

    let content = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|_| bad_request("contentBase64 is not valid base64"))?;

    let original_name = body.filename.as_deref().unwrap_or("");
    let path = images::upload_path(category, original_name, Utc::now());
    let message = format!("Upload image: {}", path);

    commit_response(&path, repo.save(&path, &content, &message))
}

/// Categories map to one directory level under the image root —
/// reject anything that could traverse out of it.
fn is_safe_category(category: &str) -> bool {
    !category.is_empty()
        && category
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ── Draft overlay ──────────────────────────────────────

#[get("/draft")]
pub fn draft_get(config: &State<AppConfig>, key: AdminKey) -> Result<Json<DraftOverlay>, ApiError> {
    gate(config, &key)?;
    Ok(Json(DraftOverlay::load(&config.draft_path)))
}

#[post("/draft", format = "json", data = "<body>")]
pub fn draft_set(
    config: &State<AppConfig>,
    key: AdminKey,
    body: Json<Value>,
) -> Result<Json<Value>, ApiError> {
    gate(config, &key)?;
    let overlay = DraftOverlay::from_value(&body.into_inner());
    overlay.store(&config.draft_path).map_err(|e| {
        (
            Status::InternalServerError,
            Json(json!({"error": format!("Failed to store draft: {}", e)})),
        )
    })?;
    Ok(Json(json!({"ok": true})))
}

#[delete("/draft")]
pub fn draft_clear(config: &State<AppConfig>, key: AdminKey) -> Result<Json<Value>, ApiError> {
    gate(config, &key)?;
    DraftOverlay::clear(&config.draft_path);
    Ok(Json(json!({"ok": true})))
}

// ── Gallery rescan ─────────────────────────────────────

/// Walk the image tree and return the regenerated category mapping —
/// the admin decides whether to save it as the new gallery document.
#[get("/gallery/scan")]
pub fn gallery_scan(config: &State<AppConfig>, key: AdminKey) -> Result<Json<Value>, ApiError> {
    gate(config, &key)?;
    let gallery = gallery::scan_dir(&config.images_dir);
    Ok(Json(json!({"ok": true, "gallery": gallery})))
}

fn bad_request(message: &str) -> ApiError {
    (Status::BadRequest, Json(json!({"error": message})))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![ping, save, upload, draft_get, draft_set, draft_clear, gallery_scan]
}
