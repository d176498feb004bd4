use std::sync::OnceLock;

use serde::Deserialize;

/// Settings for the RAG integration, loaded from the environment
/// (`PAGERAG_BASE_URL`, `PAGERAG_TIMEOUT`, ...).
#[derive(Debug, Deserialize, Clone)]
pub struct RagConfig {
    /// Base URL of the external RAG service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Delivery/query timeout in seconds. Must be positive.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Master switch: when false, published pages are rendered but never delivered.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_is_active() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            api_version: default_api_version(),
            is_active: default_is_active(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl RagConfig {
    pub fn from_env() -> Result<Self, SettingsError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("PAGERAG").separator("__"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would misconfigure delivery rather than fail it later.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.timeout == 0 {
            return Err(SettingsError::Invalid("timeout must be positive".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SettingsError::Invalid(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Holder for the one settings instance a deployment is allowed to have.
/// Installing a second instance is a configuration error, not a swap.
pub struct SettingsSlot(OnceLock<RagConfig>);

impl SettingsSlot {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn install(&self, config: RagConfig) -> Result<(), SettingsError> {
        config.validate()?;
        self.0
            .set(config)
            .map_err(|_| SettingsError::AlreadyInstalled)
    }

    pub fn get(&self) -> Option<&RagConfig> {
        self.0.get()
    }
}

/// The process-wide settings slot used by the service binary.
pub static SETTINGS: SettingsSlot = SettingsSlot::new();

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings already installed, only one instance is allowed")]
    AlreadyInstalled,
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RagConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.api_version, "v1");
        assert!(config.is_active);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = RagConfig {
            timeout: 0,
            ..RagConfig::default()
        };
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn non_http_base_url_rejected() {
        let config = RagConfig {
            base_url: "localhost:8000".to_string(),
            ..RagConfig::default()
        };
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn second_install_rejected() {
        let slot = SettingsSlot::new();
        assert!(slot.install(RagConfig::default()).is_ok());
        assert!(matches!(
            slot.install(RagConfig::default()),
            Err(SettingsError::AlreadyInstalled)
        ));
        assert!(slot.get().is_some());
    }
}
