//! Client configuration.
//!
//! A deployment target is a base URL plus a path prefix. Both are fixed once
//! the client is built.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ABL_API_URL` | Base URL of the API server | `http://localhost:8000` |
//! | `ABL_API_PREFIX` | Path prefix before every endpoint | `/` |
//! | `ABL_DEBUG` | `true` enables per-request debug logging | off |

use crate::network::{
    API_PREFIX_ENV, API_URL_ENV, DEBUG_ENV, DEFAULT_API_URL, DEFAULT_PATH_PREFIX,
};

/// Deployment target and logging switch for [`AblApiClient`](super::AblApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    path_prefix: String,
    verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            verbose: false,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `ABL_API_URL`, `ABL_API_PREFIX` and `ABL_DEBUG`.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = env_non_empty(API_URL_ENV) {
            config = config.with_base_url(url);
        }
        if let Some(prefix) = env_non_empty(API_PREFIX_ENV) {
            config = config.with_path_prefix(prefix);
        }
        config.verbose = env_non_empty(DEBUG_ENV).as_deref() == Some("true");
        config
    }

    /// Set the base URL. A trailing slash is removed.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the path prefix. It is normalized to start and end with `/`.
    pub fn with_path_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.path_prefix = normalize_prefix(prefix.as_ref());
        self
    }

    /// Enable or disable per-request debug logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
