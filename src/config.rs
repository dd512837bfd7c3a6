use log::warn;
use serde::Deserialize;
use std::fs;

/// Application configuration, read once at startup from `muhely.toml`
/// with environment-variable overrides for the secrets
/// (ADMIN_KEY, GITHUB_TOKEN, GITHUB_REPO, GITHUB_BRANCH).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared admin secret. Empty means "not configured" — the gate
    /// rejects every privileged request with a configuration error.
    pub admin_key: String,
    pub github_token: String,
    /// "owner/repo"
    pub github_repo: String,
    pub github_branch: String,

    pub content_dir: String,
    pub images_dir: String,
    pub static_dir: String,
    /// Fixed location of the draft overlay blob. Absence is a valid
    /// state (empty overlay).
    pub draft_path: String,
    /// Recipient of the contact form's mailto link.
    pub contact_email: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    admin: AdminSection,
    #[serde(default)]
    github: GithubSection,
    #[serde(default)]
    site: SiteSection,
}

#[derive(Debug, Default, Deserialize)]
struct AdminSection {
    #[serde(default)]
    key: String,
}

#[derive(Debug, Default, Deserialize)]
struct GithubSection {
    #[serde(default)]
    token: String,
    #[serde(default)]
    repo: String,
    #[serde(default)]
    branch: String,
}

#[derive(Debug, Default, Deserialize)]
struct SiteSection {
    content_dir: Option<String>,
    images_dir: Option<String>,
    static_dir: Option<String>,
    draft_path: Option<String>,
    contact_email: Option<String>,
}

impl AppConfig {
    pub fn load() -> AppConfig {
        let file = match fs::read_to_string("muhely.toml") {
            Ok(raw) => match toml::from_str::<ConfigFile>(&raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("muhely.toml is not valid TOML ({}) — using defaults", e);
                    ConfigFile::default()
                }
            },
            Err(_) => ConfigFile::default(),
        };

        let env_or = |name: &str, fallback: String| -> String {
            std::env::var(name).unwrap_or(fallback)
        };

        let branch = env_or("GITHUB_BRANCH", file.github.branch);

        AppConfig {
            admin_key: env_or("ADMIN_KEY", file.admin.key),
            github_token: env_or("GITHUB_TOKEN", file.github.token),
            github_repo: env_or("GITHUB_REPO", file.github.repo),
            github_branch: if branch.is_empty() { "main".to_string() } else { branch },
            content_dir: file.site.content_dir.unwrap_or_else(|| "website/content".to_string()),
            images_dir: file.site.images_dir.unwrap_or_else(|| "website/images".to_string()),
            static_dir: file.site.static_dir.unwrap_or_else(|| "website/static".to_string()),
            draft_path: file.site.draft_path.unwrap_or_else(|| "website/draft.json".to_string()),
            contact_email: file.site.contact_email.unwrap_or_default(),
        }
    }
}
