//! Client configuration (layered: code > env > config file > defaults).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh";
pub const DEFAULT_PUBLIC_ROOT: &str = "/";

const ENV_BACKEND_URL: &str = "REALTY_BACKEND_URL";
const ENV_TIMEOUT_SECS: &str = "REALTY_TIMEOUT_SECS";
const ENV_PUBLIC_ROOT: &str = "REALTY_PUBLIC_ROOT";
const ENV_NOTIFY_SUCCESS: &str = "REALTY_NOTIFY_SUCCESS";

/// Settings for [`HttpClient`](crate::http::HttpClient).
///
/// # Example
/// ```
/// use std::time::Duration;
/// use realty_console::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:5000".to_string())
///     .timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.refresh_path, "/api/auth/refresh");
/// assert!(config.notify_success);
/// ```
#[derive(Debug, Clone, Builder, PartialEq)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Default per-request timeout.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default = DEFAULT_REFRESH_PATH.to_string())]
    pub refresh_path: String,
    /// Where the user is sent after the session is lost.
    #[builder(default = DEFAULT_PUBLIC_ROOT.to_string())]
    pub public_root: String,
    /// Emit notifications for 2xx responses too.
    #[builder(default = true)]
    pub notify_success: bool,
}

/// On-disk form of the configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub backend_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub refresh_path: Option<String>,
    pub public_root: Option<String>,
    pub notify_success: Option<bool>,
}

impl ConfigFile {
    /// Read a config file. A missing file yields an empty config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(ConsoleError::Io(err)),
        };
        toml::from_str(&raw).map_err(|err| {
            ConsoleError::Configuration(format!("Invalid config file {}: {err}", path.display()))
        })
    }

    /// Overlay values from a variable lookup (normally the process env).
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.backend_url = Some(url);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                ConsoleError::Configuration(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {secs:?}"))
            })?;
            self.timeout_secs = Some(secs);
        }
        if let Some(root) = lookup(ENV_PUBLIC_ROOT) {
            self.public_root = Some(root);
        }
        if let Some(flag) = lookup(ENV_NOTIFY_SUCCESS) {
            self.notify_success = Some(parse_flag(&flag)?);
        }
        Ok(self)
    }

    /// Load `.env`, then the default config file overlaid with the process
    /// environment.
    pub fn discover() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let file = match ClientConfig::default_config_path() {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        file.merge_env(|key| std::env::var(key).ok())
    }

    /// Resolve into a [`ClientConfig`]. The backend URL is required.
    pub fn resolve(self) -> Result<ClientConfig> {
        let base_url = self.backend_url.ok_or_else(|| {
            ConsoleError::Configuration(format!(
                "No backend URL configured; set {ENV_BACKEND_URL} or backend_url in the config file"
            ))
        })?;
        let config = ClientConfig {
            base_url,
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            refresh_path: self
                .refresh_path
                .unwrap_or_else(|| DEFAULT_REFRESH_PATH.to_string()),
            public_root: self
                .public_root
                .unwrap_or_else(|| DEFAULT_PUBLIC_ROOT.to_string()),
            notify_success: self.notify_success.unwrap_or(true),
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConsoleError::Configuration(format!(
            "{ENV_NOTIFY_SUCCESS} must be a boolean, got {other:?}"
        ))),
    }
}

impl ClientConfig {
    /// Load from `.env`, the process environment and the default config
    /// file, in that order of precedence (env wins over file).
    pub fn from_env() -> Result<Self> {
        ConfigFile::discover()?.resolve()
    }

    /// Platform config file location (`<config dir>/realty-console/config.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "realty", "realty-console")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Check that the base URL parses and the paths are absolute.
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.base_url).map_err(|err| {
            ConsoleError::Configuration(format!("Invalid backend URL {:?}: {err}", self.base_url))
        })?;
        for (name, path) in [
            ("refresh_path", &self.refresh_path),
            ("public_root", &self.public_root),
        ] {
            if !path.starts_with('/') {
                return Err(ConsoleError::Configuration(format!(
                    "{name} must start with '/', got {path:?}"
                )));
            }
        }
        Ok(())
    }

    /// Whether a request path targets the refresh endpoint.
    pub fn is_refresh_path(&self, path: &str) -> bool {
        path.contains(self.refresh_path.as_str())
    }
}
