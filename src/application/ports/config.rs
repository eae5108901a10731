//! Config persistence port

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Where settings are loaded from and saved to
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration.
    ///
    /// A missing file is not an error; it loads as an all-None config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the given configuration.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file.
    fn path(&self) -> PathBuf;

    /// Check if the configuration file exists.
    fn exists(&self) -> bool;

    /// Create the configuration file with default values.
    /// Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
