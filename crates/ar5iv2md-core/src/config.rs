use crate::error::{Error, Result};
use crate::source::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run configuration. Every field has a default; a TOML file passed with
/// `--config` only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix the identifier is appended to when building the page URL.
    pub base_url: String,
    /// Whole-transfer timeout per request, in seconds.
    pub timeout_secs: u64,
    /// Connection establishment timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Image downloads running at once (1 = sequential).
    pub max_concurrent_assets: usize,
    /// Redirect hops followed before giving up.
    pub max_redirects: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 15,
            user_agent: concat!("ar5iv2md/", env!("CARGO_PKG_VERSION")).to_string(),
            max_concurrent_assets: 4,
            max_redirects: 10,
        }
    }
}

impl Config {
    /// Load a config file. Nothing is read implicitly; callers pass the path
    /// the user named.
    pub fn load(path: &Path) -> Result<Config> {
        let data = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&data).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }
}
