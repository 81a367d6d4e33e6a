//! Site configuration: where the content tree lives, where to bind, and
//! the optional comment-store credentials. Read from a JSON file with
//! environment overrides; every field has a default so a missing config
//! file is not an error (a missing content file is).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SiteError, SiteResult};

pub const CONFIG_ENV: &str = "STUDYSHELF_CONFIG";
pub const CONTENT_ENV: &str = "STUDYSHELF_CONTENT";
pub const BIND_ENV: &str = "STUDYSHELF_BIND";
pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_ENV: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub content_path: PathBuf,
    /// `host:port`; port 0 binds an ephemeral port.
    pub bind: String,
    pub comments: Option<CommentsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "studyshelf".to_string(),
            content_path: PathBuf::from("data/content.json"),
            bind: "127.0.0.1:8080".to_string(),
            comments: None,
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> SiteResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|error| {
            SiteError::ConfigLoad(format!(
                "failed to read config file {}: {error}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw)
            .map_err(|error| SiteError::ConfigLoad(format!("malformed config: {error}")))
    }

    /// Config for the binary: the file named by `STUDYSHELF_CONFIG` if
    /// set (must then exist and parse), defaults otherwise, with the
    /// remaining environment overrides applied on top.
    pub fn from_env() -> SiteResult<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        if let Ok(content) = std::env::var(CONTENT_ENV) {
            config.content_path = PathBuf::from(content);
        }
        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.bind = bind;
        }
        if let (Ok(base_url), Ok(api_key)) = (
            std::env::var(SUPABASE_URL_ENV),
            std::env::var(SUPABASE_KEY_ENV),
        ) {
            if !base_url.is_empty() && !api_key.is_empty() {
                config.comments = Some(CommentsConfig { base_url, api_key });
            }
        }
        Ok(config)
    }
}
