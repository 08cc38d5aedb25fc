//! Configuration management for Glint.
//!
//! Parses `glint.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Two concerns live here:
//!
//! - `[assets]`: where emoji (and other) asset URLs are rooted — a CDN
//!   host, an application URL with an optional relative sub-path, or
//!   nothing for root-relative links
//! - `[trackers.<name>]`: external issue tracker templates a host
//!   application assigns to projects

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use glint_types::{AssetUrls, ExternalTracker};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "glint.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset URL configuration.
    pub assets: AssetsConfig,
    /// External tracker templates, keyed by tracker name.
    pub trackers: BTreeMap<String, TrackerConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Asset URL configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// CDN host, e.g. `https://cdn.example.com`. Takes precedence over
    /// `app_url` when both are set.
    pub cdn_host: Option<String>,
    /// Application URL, e.g. `http://localhost/forge`. May carry a
    /// relative sub-path.
    pub app_url: Option<String>,
}

/// External tracker template.
#[derive(Clone, Debug, Deserialize)]
pub struct TrackerConfig {
    /// Human-readable tracker name, used in link titles.
    pub display_name: String,
    /// Issue URL template with an `:id` placeholder.
    pub issues_url: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `glint.toml` in the current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing/validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any URL field is malformed or a
    /// tracker template lacks its `:id` placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref cdn_host) = self.assets.cdn_host {
            require_http_url(cdn_host, "assets.cdn_host")?;
        }
        if let Some(ref app_url) = self.assets.app_url {
            require_http_url(app_url, "assets.app_url")?;
        }
        for (name, tracker) in &self.trackers {
            require_http_url(&tracker.issues_url, &format!("trackers.{name}.issues_url"))?;
            if !tracker.issues_url.contains(":id") {
                return Err(ConfigError::Validation(format!(
                    "trackers.{name}.issues_url must contain an :id placeholder"
                )));
            }
            if tracker.display_name.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "trackers.{name}.display_name cannot be empty"
                )));
            }
        }
        Ok(())
    }

    /// Asset URL resolver built from the `[assets]` section.
    #[must_use]
    pub fn asset_urls(&self) -> AssetUrls {
        let mut urls = AssetUrls::new();
        if let Some(ref app_url) = self.assets.app_url {
            urls = urls.with_app_url(app_url);
        }
        if let Some(ref cdn_host) = self.assets.cdn_host {
            urls = urls.with_cdn_host(cdn_host);
        }
        urls
    }

    /// Instantiate a named tracker template with a project's prefix.
    ///
    /// Returns `None` when no template of that name is configured; the host
    /// wires the result into its [`glint_types::ReferenceStore`]
    /// implementation.
    #[must_use]
    pub fn external_tracker(&self, name: &str, prefix: &str) -> Option<ExternalTracker> {
        self.trackers.get(name).map(|tracker| ExternalTracker {
            prefix: prefix.to_owned(),
            issues_url: tracker.issues_url.clone(),
            display_name: tracker.display_name.clone(),
        })
    }
}
