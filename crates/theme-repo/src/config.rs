use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use theme_repo_core::TemplateId;
use url::Url;

/// Address the backend binds to out of the box.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3001";

/// Environment variables consulted for the backend URL, in priority order.
pub const BACKEND_URL_ENV_VARS: [&str; 2] = ["THEME_REPO_BACKEND_URL", "PUBLIC_BACKEND_URL"];

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the theme-repo backend. May carry a path prefix.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Seconds before a notification dismisses itself
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,

    /// Seconds before a backend request is abandoned as a network error
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Template selected when a detail view is first opened
    #[serde(default)]
    pub default_template: TemplateId,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_notification_timeout() -> u64 {
    6
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            notification_timeout_secs: default_notification_timeout(),
            request_timeout_secs: default_request_timeout(),
            default_template: TemplateId::default(),
        }
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub notification_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/theme-repo/config.json` (or the platform equivalent)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("theme-repo").join("config.json"))
    }

    /// Build the effective configuration.
    ///
    /// Layers, lowest priority first: defaults, the config file, the
    /// environment (looked up through `env`), then `overrides`. An explicit
    /// `config_path` must exist; the default path is skipped when absent.
    pub fn resolve(
        config_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.is_file() => {
                    tracing::debug!("Loading config from {}", path.display());
                    Self::load_from_file(&path)?
                }
                _ => Self::default(),
            },
        };

        config.apply_env(env);
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Resolve against the real process environment.
    pub fn resolve_from_system(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        Self::resolve(config_path, |key| std::env::var(key).ok(), overrides)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let from_env = BACKEND_URL_ENV_VARS
            .iter()
            .find_map(|key| env(key).filter(|v| !v.trim().is_empty()));
        if let Some(url) = from_env {
            self.backend_url = url.trim().to_string();
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.backend_url {
            self.backend_url = url.clone();
        }
        if let Some(secs) = overrides.notification_timeout_secs {
            self.notification_timeout_secs = secs;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.notification_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "notification_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.default_template.as_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_template must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The backend URL, parsed and checked to be an http(s) base.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.backend_url).map_err(|e| {
            ConfigError::ValidationError(format!("invalid backend_url {:?}: {e}", self.backend_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::ValidationError(format!(
                "backend_url must be an http or https URL, got {:?}",
                self.backend_url
            )));
        }
        Ok(url)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
