//! Application settings value object

use serde::{Deserialize, Serialize};

use crate::domain::recording::QualityPreset;

/// Default keep-alive interval in seconds
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

/// Application settings.
/// Every field is optional so partial layers (file, env, flags) can merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_dir: Option<String>,
    pub notify: Option<bool>,
    pub quality: Option<String>,
    pub keep_alive_interval: Option<u64>,
}

impl AppConfig {
    /// Create config with default values.
    /// `output_dir` stays unset; the recording store resolves the platform
    /// data directory when no override is given.
    pub fn defaults() -> Self {
        Self {
            output_dir: None,
            notify: Some(false),
            quality: Some("high".to_string()),
            keep_alive_interval: Some(DEFAULT_KEEP_ALIVE_SECS),
        }
    }

    /// Config with nothing set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Layer `other` on top of this config.
    /// A field set in `other` wins; unset fields fall through.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            notify: other.notify.or(self.notify),
            quality: other.quality.or(self.quality),
            keep_alive_interval: other.keep_alive_interval.or(self.keep_alive_interval),
        }
    }

    /// Get quality as a parsed preset, or the default if not set/invalid
    pub fn quality_or_default(&self) -> QualityPreset {
        self.quality
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Whether desktop notifications are enabled; off when unset
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get keep-alive interval in seconds, or the default if not set
    pub fn keep_alive_interval_or_default(&self) -> u64 {
        self.keep_alive_interval.unwrap_or(DEFAULT_KEEP_ALIVE_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_values() {
        let config = AppConfig::defaults();
        assert!(config.output_dir.is_none());
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.quality, Some("high".to_string()));
        assert_eq!(config.keep_alive_interval, Some(DEFAULT_KEEP_ALIVE_SECS));
    }

    #[test]
    fn empty_is_fully_unset() {
        let config = AppConfig::empty();
        assert!(config.output_dir.is_none());
        assert!(config.notify.is_none());
        assert!(config.quality.is_none());
        assert!(config.keep_alive_interval.is_none());
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let base = AppConfig {
            output_dir: Some("/tmp/memos".to_string()),
            quality: Some("high".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            output_dir: Some("/var/memos".to_string()),
            quality: None, // unset, must not clobber base
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.output_dir, Some("/var/memos".to_string()));
        assert_eq!(merged.quality, Some("high".to_string())); // falls through from base
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_falls_back_to_the_base() {
        let base = AppConfig {
            notify: Some(true),
            keep_alive_interval: Some(120),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.notify, Some(true));
        assert_eq!(merged.keep_alive_interval, Some(120));
    }

    #[test]
    fn quality_or_default_parses() {
        let config = AppConfig {
            quality: Some("low".to_string()),
            ..Default::default()
        };
        assert_eq!(config.quality_or_default(), QualityPreset::Low);
    }

    #[test]
    fn quality_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            quality: Some("lossless".to_string()),
            ..Default::default()
        };
        assert_eq!(config.quality_or_default(), QualityPreset::High);
    }

    #[test]
    fn quality_or_default_uses_default_on_none() {
        let config = AppConfig::empty();
        assert_eq!(config.quality_or_default(), QualityPreset::High);
    }

    #[test]
    fn boolean_and_interval_defaults() {
        let config = AppConfig::empty();
        assert!(!config.notify_or_default());
        assert_eq!(
            config.keep_alive_interval_or_default(),
            DEFAULT_KEEP_ALIVE_SECS
        );
    }
}
