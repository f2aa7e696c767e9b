//! Configuration management for CampusRide.
//!
//! Loads configuration from ${CAMPUSRIDE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::readiness::{AssetFailurePolicy, AssetSet};

pub const API_URL_ENV: &str = "CAMPUSRIDE_API_URL";
pub const SPLASH_MS_ENV: &str = "CAMPUSRIDE_SPLASH_MS";

pub mod paths {
    //! Path resolution for CampusRide configuration.
    //!
    //! CAMPUSRIDE_HOME resolution order:
    //! 1. CAMPUSRIDE_HOME environment variable (if set)
    //! 2. ~/.config/campusride (default)
    //! 3. ./.campusride when no home directory can be determined

    use std::path::PathBuf;

    pub fn campusride_home() -> PathBuf {
        if let Ok(home) = std::env::var("CAMPUSRIDE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".campusride"),
            |h| h.join(".config").join("campusride"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        campusride_home().join("config.toml")
    }
}

/// Account service settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the account service (`/api/login`, `/api/signup`).
    pub base_url: Option<String>,
    /// Per-request timeout. Unset means requests may wait forever.
    pub request_timeout_secs: Option<u64>,
}

/// Startup gating settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// How long the branded splash stays up, in milliseconds.
    pub splash_dwell_ms: u64,
    /// Assets that must resolve before first paint.
    pub assets: Vec<String>,
    /// Behaviour when one of `assets` fails to load.
    pub asset_failure: AssetFailurePolicy,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            splash_dwell_ms: Config::DEFAULT_SPLASH_DWELL_MS,
            assets: vec![Config::DEFAULT_SPLASH_ASSET.to_string()],
            asset_failure: AssetFailurePolicy::default(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub bootstrap: BootstrapConfig,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://172.20.10.2:5005";
    const DEFAULT_SPLASH_DWELL_MS: u64 = 5_000;
    const DEFAULT_SPLASH_ASSET: &str = "splash2.png";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes a default config file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut defaults = Config::default();
        defaults.api.base_url = Some(Self::DEFAULT_BASE_URL.to_string());
        let contents = toml::to_string_pretty(&defaults).context("Failed to render config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the account service base URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the selected URL does not parse.
    pub fn api_base_url(&self) -> Result<String> {
        resolve_base_url(
            self.api.base_url.as_deref(),
            std::env::var(API_URL_ENV).ok().as_deref(),
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_secs.map(Duration::from_secs)
    }

    /// Splash dwell, honouring the `CAMPUSRIDE_SPLASH_MS` override.
    pub fn splash_dwell(&self) -> Duration {
        let ms = std::env::var(SPLASH_MS_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(self.bootstrap.splash_dwell_ms);
        Duration::from_millis(ms)
    }

    pub fn asset_set(&self) -> AssetSet {
        AssetSet::new(self.bootstrap.assets.iter().cloned())
    }
}

fn resolve_base_url(config_url: Option<&str>, env_url: Option<&str>) -> Result<String> {
    let chosen = [env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(Config::DEFAULT_BASE_URL);

    url::Url::parse(chosen).with_context(|| format!("Invalid account service URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bootstrap.splash_dwell_ms, 5_000);
        assert_eq!(config.bootstrap.assets, vec!["splash2.png".to_string()]);
        assert_eq!(config.bootstrap.asset_failure, AssetFailurePolicy::Stall);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:5005\"\nrequest_timeout_secs = 10\n\n[bootstrap]\nasset_failure = \"degrade\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:5005"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.bootstrap.asset_failure, AssetFailurePolicy::Degrade);
        assert_eq!(config.bootstrap.splash_dwell_ms, 5_000);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::init(&path).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some(Config::DEFAULT_BASE_URL));
        assert!(Config::init(&path).is_err());
    }

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            resolve_base_url(None, None).unwrap(),
            Config::DEFAULT_BASE_URL
        );
        assert_eq!(
            resolve_base_url(Some("http://cfg:1/"), None).unwrap(),
            "http://cfg:1"
        );
        assert_eq!(
            resolve_base_url(Some("http://cfg:1"), Some("http://env:2")).unwrap(),
            "http://env:2"
        );
        assert_eq!(
            resolve_base_url(Some("http://cfg:1"), Some("  ")).unwrap(),
            "http://cfg:1"
        );
        assert!(resolve_base_url(Some("not a url"), None).is_err());
    }
}
