// src/infrastructure/config.rs
use crate::application::{FeatureSet, UiToggles};
use crate::constants::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL, DEFAULT_SEARCH_LIMIT};
use crate::domain::{HeaderStyle, Theme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for the diary client
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub header_style: HeaderStyle,
    #[serde(default)]
    pub handwriting: bool,
    #[serde(default = "default_true")]
    pub save_chime: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FeatureConfig {
    #[serde(default = "default_true")]
    pub checklist: bool,
    #[serde(default = "default_true")]
    pub ideas: bool,
    #[serde(default = "default_true")]
    pub export: bool,
    #[serde(default = "default_true")]
    pub transcribe: bool,
    #[serde(default = "default_true")]
    pub require_folder_for_templates: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ExportConfig {
    /// Directory exported PDFs land in; empty means the working directory
    #[serde(default)]
    pub dir: String,
}

// Default value functions
fn default_url() -> String { DEFAULT_BACKEND_URL.to_string() }
fn default_search_limit() -> usize { DEFAULT_SEARCH_LIMIT }
fn default_true() -> bool { true }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            search_limit: default_search_limit(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            header_style: HeaderStyle::default(),
            handwriting: false,
            save_chime: default_true(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            checklist: true,
            ideas: true,
            export: true,
            transcribe: true,
            require_folder_for_templates: true,
        }
    }
}

impl From<&FeatureConfig> for FeatureSet {
    fn from(config: &FeatureConfig) -> Self {
        Self {
            checklist: config.checklist,
            ideas: config.ideas,
            export: config.export,
            transcribe: config.transcribe,
            require_folder_for_templates: config.require_folder_for_templates,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// `<config dir>/dear-diary/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dear-diary").join("config.toml"))
    }

    /// Load the explicit file, else the default file if present, else defaults.
    ///
    /// The backend URL is then overridden by the environment and finally by
    /// `backend_override`.
    pub fn resolve(explicit: Option<&Path>, backend_override: Option<&str>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(?path, "Using default config file");
                    Self::load(path)?
                }
                None => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                debug!(%url, "Backend URL from environment");
                config.backend.url = url;
            }
        }
        if let Some(url) = backend_override {
            config.backend.url = url.to_string();
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.backend.timeout_secs.map(Duration::from_secs)
    }

    pub fn toggles(&self) -> UiToggles {
        UiToggles {
            handwriting: self.ui.handwriting,
            header_style: self.ui.header_style,
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        if self.export.dir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.export.dir)
        }
    }
}
