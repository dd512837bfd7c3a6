use base64::Engine;
use log::warn;
use serde_json::{json, Value};

use crate::config::AppConfig;

/// One stored file: its bytes plus the opaque revision token the remote
/// store handed out when it was read.
#[derive(Debug, Clone)]
pub struct RepoFile {
    pub content: Vec<u8>,
    pub revision: String,
}

#[derive(Debug)]
pub enum RepoError {
    /// The on-disk revision changed since `known_revision` was read.
    /// Surfaced to the operator; never resolved silently.
    Conflict,
    /// The remote store is unreachable or returned an error, with
    /// whatever detail the provider supplied.
    Remote { message: String, details: Value },
}

impl RepoError {
    pub fn remote(message: impl Into<String>) -> RepoError {
        RepoError::Remote {
            message: message.into(),
            details: Value::Null,
        }
    }
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Conflict => write!(f, "Revision conflict — reload and save again"),
            RepoError::Remote { message, .. } => write!(f, "{}", message),
        }
    }
}

/// Read/write access to the remote content store, keyed by file path.
/// Writes are conditional on a revision token so concurrent admin
/// sessions surface as an explicit Conflict instead of a lost update.
pub trait ContentRepo: Send + Sync {
    /// Fetch current bytes and revision for a path. `Ok(None)` is the
    /// benign "never written" outcome, not an error.
    fn read(&self, path: &str) -> Result<Option<RepoFile>, RepoError>;

    /// Conditionally update `path`. With `known_revision` the store must
    /// reject the write when the stored revision has moved on. Without
    /// one the write unconditionally creates the file.
    fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        known_revision: Option<&str>,
    ) -> Result<String, RepoError>;

    /// Read-for-revision then one conditional write. NotFound means "no
    /// revision constraint". No retry: a Conflict goes straight back to
    /// the caller.
    fn save(&self, path: &str, content: &[u8], message: &str) -> Result<String, RepoError> {
        let revision = self.read(path)?.map(|f| f.revision);
        self.write(path, content, message, revision.as_deref())
    }
}

// ── GitHub contents API implementation ──────────────────────────────

pub struct GitHubRepo {
    client: reqwest::blocking::Client,
    token: String,
    /// "owner/repo"
    repo: String,
    branch: String,
}

impl GitHubRepo {
    pub fn new(token: &str, repo: &str, branch: &str) -> GitHubRepo {
        GitHubRepo {
            client: reqwest::blocking::Client::new(),
            token: token.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> GitHubRepo {
        if config.github_token.is_empty() || config.github_repo.is_empty() {
            warn!("GitHub repository not configured — saves will fail");
        }
        GitHubRepo::new(&config.github_token, &config.github_repo, &config.github_branch)
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "https://api.github.com/repos/{}/contents/{}",
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn request(&self, builder: reqwest::blocking::RequestBuilder) -> Result<(u16, Value), RepoError> {
        let res = builder
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "muhely")
            .send()
            .map_err(|e| RepoError::remote(format!("Content repository unreachable: {}", e)))?;

        let status = res.status().as_u16();
        let body = res.json::<Value>().unwrap_or(Value::Null);
        Ok((status, body))
    }
}

impl ContentRepo for GitHubRepo {
    fn read(&self, path: &str) -> Result<Option<RepoFile>, RepoError> {
        if self.token.is_empty() || self.repo.is_empty() {
            return Err(RepoError::remote("Missing GITHUB_TOKEN or GITHUB_REPO"));
        }

        let url = format!("{}?ref={}", self.api_url(path), self.branch);
        let (status, body) = self.request(self.client.get(&url))?;

        if status == 404 {
            return Ok(None);
        }
        if !(200..300).contains(&status) {
            return Err(RepoError::Remote {
                message: format!("GitHub read failed: {}", status),
                details: body,
            });
        }

        let revision = body
            .get("sha")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        // content comes back base64-encoded with embedded newlines
        let encoded: String = body
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let content = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .unwrap_or_default();

        Ok(Some(RepoFile { content, revision }))
    }

    fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        known_revision: Option<&str>,
    ) -> Result<String, RepoError> {
        if self.token.is_empty() || self.repo.is_empty() {
            return Err(RepoError::remote("Missing GITHUB_TOKEN or GITHUB_REPO"));
        }

        let mut payload = json!({
            "message": message,
            "content": base64::engine::general_purpose::STANDARD.encode(content),
            "branch": self.branch,
        });
        if let Some(sha) = known_revision {
            payload["sha"] = json!(sha);
        }

        let (status, body) = self.request(self.client.put(self.api_url(path)).json(&payload))?;

        if (200..300).contains(&status) {
            let commit = body
                .get("commit")
                .and_then(|c| c.get("sha"))
                .and_then(|v| v.as_str())
                .or_else(|| {
                    body.get("content")
                        .and_then(|c| c.get("sha"))
                        .and_then(|v| v.as_str())
                })
                .unwrap_or("");
            return Ok(commit.to_string());
        }

        // 409 is an outright conflict; 422 carries the sha-mismatch case
        let mismatch = status == 422
            && body
                .get("message")
                .and_then(|v| v.as_str())
                .map(|m| m.contains("does not match"))
                .unwrap_or(false);
        if status == 409 || mismatch {
            return Err(RepoError::Conflict);
        }

        Err(RepoError::Remote {
            message: format!("GitHub write failed: {}", status),
            details: body,
        })
    }
}
