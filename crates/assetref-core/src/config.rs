use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::DefaultImageSet;

/// Environment variable that overrides `base_origin`.
pub const BASE_ORIGIN_ENV: &str = "ASSETREF_API_BASE_URL";

/// Backend origin used when neither config nor environment supplies one.
pub const DEFAULT_BASE_ORIGIN: &str = "http://localhost:8000";

/// Reachability probe parameters (optional `[probe]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for one probe request in seconds.
    pub timeout_secs: u64,
    /// Issue a single `Range: bytes=0-0` GET when the server rejects HEAD (405/501).
    pub get_on_head_rejected: bool,
    /// Origin the front end is served from. Relative URLs (e.g. `/assets/...`)
    /// are joined against it before probing; without it they cannot be probed.
    pub page_origin: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            timeout_secs: 10,
            get_on_head_rejected: true,
            page_origin: None,
        }
    }
}

/// Global configuration loaded from `~/.config/assetref/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetrefConfig {
    /// Backend origin prefixed onto upload paths and bare filenames.
    pub base_origin: String,
    /// Directory on the backend that bare filenames live in.
    pub upload_root: String,
    /// Prefix of bundled front-end assets, served by the page origin.
    pub static_prefix: String,
    /// Prefix of backend-managed uploads.
    pub upload_prefix: String,
    pub defaults: DefaultImageSet,
    pub probe: ProbeConfig,
}

impl Default for AssetrefConfig {
    fn default() -> Self {
        Self {
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            upload_root: "/uploads".to_string(),
            static_prefix: "/assets/".to_string(),
            upload_prefix: "/uploads/".to_string(),
            defaults: DefaultImageSet::default(),
            probe: ProbeConfig::default(),
        }
    }
}

/// A configuration value that would make resolution ambiguous or unusable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base_origin must be an absolute http(s) URL, got {0:?}")]
    BaseOrigin(String),
    #[error("{field} must be non-empty and start with '/', got {value:?}")]
    Prefix { field: &'static str, value: String },
    #[error("static_prefix {static_prefix:?} and upload_prefix {upload_prefix:?} overlap")]
    OverlappingPrefixes {
        static_prefix: String,
        upload_prefix: String,
    },
    #[error("probe.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("probe.page_origin must be an absolute http(s) URL, got {0:?}")]
    PageOrigin(String),
}

fn is_http_origin(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://"))
        && url::Url::parse(value).is_ok_and(|u| u.host_str().is_some())
}

impl AssetrefConfig {
    /// Replace `base_origin` with `value` when present and non-blank.
    pub fn with_base_origin_override(mut self, value: Option<String>) -> Self {
        if let Some(v) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            tracing::debug!("base_origin overridden: {} -> {}", self.base_origin, v);
            self.base_origin = v;
        }
        self
    }

    /// Layer the environment value, then the command-line value, over the
    /// file's `base_origin`, and validate the result once. A bad environment
    /// value is harmless when the command line replaces it.
    pub fn layered(
        self,
        env_origin: Option<String>,
        flag_origin: Option<String>,
    ) -> Result<Self, ConfigError> {
        let cfg = self
            .with_base_origin_override(env_origin)
            .with_base_origin_override(flag_origin);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the resolver relies on.
    ///
    /// Upload-shaped and filename-shaped references resolve to
    /// `base_origin + ...`, so a non-absolute origin would break idempotence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_origin(&self.base_origin) {
            return Err(ConfigError::BaseOrigin(self.base_origin.clone()));
        }
        for (field, value) in [
            ("static_prefix", &self.static_prefix),
            ("upload_prefix", &self.upload_prefix),
        ] {
            if value.len() < 2 || !value.starts_with('/') {
                return Err(ConfigError::Prefix {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.static_prefix.starts_with(&self.upload_prefix)
            || self.upload_prefix.starts_with(&self.static_prefix)
        {
            return Err(ConfigError::OverlappingPrefixes {
                static_prefix: self.static_prefix.clone(),
                upload_prefix: self.upload_prefix.clone(),
            });
        }
        if self.probe.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_secs"));
        }
        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("timeout_secs"));
        }
        if let Some(origin) = &self.probe.page_origin {
            if !is_http_origin(origin) {
                return Err(ConfigError::PageOrigin(origin.clone()));
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetref")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating it with defaults if missing.
pub fn load_or_init_at(path: &Path) -> Result<AssetrefConfig> {
    if !path.exists() {
        let default_cfg = AssetrefConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AssetrefConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk (creating a default file if none exists),
/// apply `ASSETREF_API_BASE_URL`, then `base_origin` if given, and validate.
pub fn load_or_init_with(base_origin: Option<String>) -> Result<AssetrefConfig> {
    let path = config_path()?;
    load_or_init_at(&path)?
        .layered(std::env::var(BASE_ORIGIN_ENV).ok(), base_origin)
        .with_context(|| format!("invalid config: {}", path.display()))
}

/// [`load_or_init_with`] without a command-line override.
pub fn load_or_init() -> Result<AssetrefConfig> {
    load_or_init_with(None)
}
