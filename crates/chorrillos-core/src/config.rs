use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// HTTP method used to expand links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    #[default]
    Head,
    Get,
}

/// Which links get a network round-trip before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandMode {
    /// Every link is expanded.
    #[default]
    Always,
    /// Only `maps.app.goo.gl` / `goo.gl/maps` links are expanded; others are parsed as given.
    ShortenedOnly,
}

/// Outbound request settings for redirect expansion (`[http]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub method: RequestMethod,
    pub connect_timeout_secs: u64,
    /// Total transfer timeout, redirects included.
    pub timeout_secs: u64,
    pub max_redirects: u32,
    /// Short-link hosts answer bare clients differently, so send a browser-like agent.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            method: RequestMethod::Head,
            connect_timeout_secs: 5,
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: "Mozilla/5.0 (compatible; chorrillos-seguro/0.1)".to_string(),
        }
    }
}

/// Geocoding service settings (`[geocode]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    /// Nominatim-compatible base URL.
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    /// Responses larger than this are abandoned mid-transfer.
    pub max_body_bytes: usize,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "chorrillos-seguro/0.1".to_string(),
            connect_timeout_secs: 5,
            timeout_secs: 10,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Global configuration loaded from `~/.config/chorrillos/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChorrillosConfig {
    /// Listen address for `chorrillos serve`.
    pub bind: String,
    pub expand_mode: ExpandMode,
    pub http: HttpConfig,
    pub geocode: GeocodeConfig,
}

impl Default for ChorrillosConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            expand_mode: ExpandMode::Always,
            http: HttpConfig::default(),
            geocode: GeocodeConfig::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bind address {0:?} is not a valid socket address")]
    InvalidBind(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("geocode.base_url {0:?} must be an http(s) URL")]
    InvalidGeocodeUrl(String),
}

impl ChorrillosConfig {
    /// Checks every recognized key; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidBind(self.bind.clone()));
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero("http.connect_timeout_secs"));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Zero("http.timeout_secs"));
        }
        if self.http.max_redirects == 0 {
            return Err(ConfigError::Zero("http.max_redirects"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Empty("http.user_agent"));
        }
        if self.geocode.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero("geocode.connect_timeout_secs"));
        }
        if self.geocode.timeout_secs == 0 {
            return Err(ConfigError::Zero("geocode.timeout_secs"));
        }
        if self.geocode.max_body_bytes == 0 {
            return Err(ConfigError::Zero("geocode.max_body_bytes"));
        }
        if self.geocode.user_agent.trim().is_empty() {
            return Err(ConfigError::Empty("geocode.user_agent"));
        }
        match url::Url::parse(&self.geocode.base_url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidGeocodeUrl(self.geocode.base_url.clone())),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.bind.clone()))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("chorrillos")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG location, creating a default file if none exists.
pub fn load_or_init() -> Result<ChorrillosConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ChorrillosConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ChorrillosConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ChorrillosConfig = toml::from_str(&data)
        .with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
