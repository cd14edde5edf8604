//! Configuration management for the refiner.
//!
//! Loads settings from `~/.config/prompt-refiner/config.toml` with environment
//! overrides. The `[settings]` table uses the same keys the browser extension
//! persists (`apiProvider`, `apiKey`, ...).

use crate::i18n::Language;
use crate::refine::ProviderSettings;
use crate::style::RefinementStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Provider used when none has been chosen.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub settings: StoredSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on a provider call. Absent means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Persisted user settings, as written by the extension's options page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_refinement_style: Option<String>,
}

impl StoredSettings {
    /// Provider settings for the dispatcher. An unset provider means OpenAI;
    /// a set but unknown one is passed through so it can be rejected.
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            provider: self
                .api_provider
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PROVIDER)
                .to_string(),
            api_key: self.api_key.clone(),
            model: self.api_model.clone(),
        }
    }

    pub fn language(&self) -> Language {
        self.ui_language
            .as_deref()
            .map(Language::from_str_lossy)
            .unwrap_or_default()
    }

    pub fn default_style(&self) -> RefinementStyle {
        self.default_refinement_style
            .as_deref()
            .map(RefinementStyle::from_str_lossy)
            .unwrap_or_default()
    }

    /// Set a value by its persisted key name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = Some(value.to_string());
        match key {
            "apiProvider" => self.api_provider = value,
            "apiKey" => self.api_key = value,
            "apiModel" => self.api_model = value,
            "uiLanguage" => self.ui_language = value,
            "defaultRefinementStyle" => self.default_refinement_style = value,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

// Default value functions
fn default_port() -> u16 { 7879 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prompt-refiner")
            .join("config.toml")
    }

    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from a specific path.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Apply environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        let settings = &mut self.settings;
        for (var, slot) in [
            ("PROMPT_REFINER_PROVIDER", &mut settings.api_provider),
            ("PROMPT_REFINER_API_KEY", &mut settings.api_key),
            ("PROMPT_REFINER_MODEL", &mut settings.api_model),
            ("PROMPT_REFINER_LANGUAGE", &mut settings.ui_language),
            ("PROMPT_REFINER_STYLE", &mut settings.default_refinement_style),
        ] {
            if let Ok(value) = std::env::var(var) {
                *slot = Some(value);
            }
        }
        if let Ok(val) = std::env::var("PROMPT_REFINER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        self
    }

    /// Save config to file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(&path, content).map_err(ConfigError::Io)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Parse error: {0}")]
    Parse(toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),
}

/// Source of the persisted settings. Read once per refinement, never cached.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<StoredSettings, ConfigError>;
}

/// Reads the config file (plus environment overrides) on every call, so edits
/// take effect on the next request.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new(Config::default_path())
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<StoredSettings, ConfigError> {
        Ok(Config::load_from(self.path.clone())?
            .with_env_overrides()
            .settings)
    }
}

/// In-process settings, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Arc<RwLock<StoredSettings>>,
}

impl MemorySettingsStore {
    pub fn new(settings: StoredSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Replace the stored settings.
    pub fn replace(&self, settings: StoredSettings) {
        if let Ok(mut guard) = self.settings.write() {
            *guard = settings;
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<StoredSettings, ConfigError> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| ConfigError::Io(std::io::Error::other(e.to_string())))
    }
}
