//! TOML config storage under the XDG config directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Config store backed by a TOML file in the platform config dir
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Store at the default location, `$XDG_CONFIG_HOME/tapedeck/config.toml`
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("tapedeck");

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Store at an explicit path, used by tests and overrides
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            // A missing file loads as an empty config
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        // The config dir may not exist yet on first save
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        let defaults = AppConfig::defaults();
        self.save(&defaults).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_in_config_dir() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("tapedeck"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn explicit_path_is_kept() {
        let store = XdgConfigStore::with_path("/opt/tapedeck/config.toml");
        assert_eq!(store.path(), PathBuf::from("/opt/tapedeck/config.toml"));
    }

    #[test]
    fn loads_flat_toml_document() {
        let content = r#"
output_dir = "/tmp/memos"
notify = true
quality = "low"
keep_alive_interval = 120
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.output_dir, Some("/tmp/memos".to_string()));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.quality, Some("low".to_string()));
        assert_eq!(config.keep_alive_interval, Some(120));
    }

    #[test]
    fn toml_survives_round_trip() {
        let config = AppConfig {
            output_dir: Some("/tmp/memos".to_string()),
            notify: Some(true),
            quality: Some("low".to_string()),
            keep_alive_interval: Some(120),
        };

        let toml = XdgConfigStore::to_toml(&config).unwrap();
        let parsed = XdgConfigStore::parse_toml(&toml).unwrap();

        assert_eq!(config.output_dir, parsed.output_dir);
        assert_eq!(config.notify, parsed.notify);
        assert_eq!(config.quality, parsed.quality);
        assert_eq!(config.keep_alive_interval, parsed.keep_alive_interval);
    }

    #[tokio::test]
    async fn load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let config = store.load().await.unwrap();
        assert!(config.output_dir.is_none());
        assert!(config.quality.is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));

        let config = AppConfig {
            notify: Some(true),
            keep_alive_interval: Some(30),
            ..Default::default()
        };
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.notify, Some(true));
        assert_eq!(loaded.keep_alive_interval, Some(30));
        assert!(loaded.output_dir.is_none());
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        store.init().await.unwrap();
        assert!(store.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.quality, Some("high".to_string()));

        let again = store.init().await;
        assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));
    }
}
