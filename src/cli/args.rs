//! Clap argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::AppConfig;
use crate::domain::recording::QualityPreset;

/// Tapedeck - terminal voice memo recorder
#[derive(Parser, Debug)]
#[command(name = "tapedeck")]
#[command(version = "0.3.0")]
#[command(about = "Record and play back voice memos from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory recordings are saved to
    #[arg(short = 'o', long, value_name = "DIR", env = "TAPEDECK_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Recording quality preset
    #[arg(short = 'q', long, value_name = "PRESET")]
    pub quality: Option<QualityArg>,

    /// Mirror recording status into desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Seconds between keep-alive runs while recording with --notify
    #[arg(long, value_name = "SECS")]
    pub keep_alive_interval: Option<u64>,

    /// Optional subcommand; without one the recording screen opens
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Convert parsed arguments into a partial config for merging.
    /// Flags that were not given stay None so they do not override the
    /// config file.
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            output_dir: self.output_dir.clone(),
            notify: if self.notify { Some(true) } else { None },
            quality: self
                .quality
                .map(|q| QualityPreset::from(q).as_str().to_string()),
            keep_alive_interval: self.keep_alive_interval,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and edit stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions under the config subcommand
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a fresh config file with default values
    Init,
    /// Update one key
    Set {
        /// Key to update
        key: String,
        /// Value to store
        value: String,
    },
    /// Print one key
    Get {
        /// Key to look up
        key: String,
    },
    /// Show every key and its value
    List,
    /// Print the config file location
    Path,
}

/// Quality argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QualityArg {
    High,
    Low,
}

impl From<QualityArg> for QualityPreset {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::High => QualityPreset::High,
            QualityArg::Low => QualityPreset::Low,
        }
    }
}

impl From<QualityPreset> for QualityArg {
    fn from(preset: QualityPreset) -> Self {
        match preset {
            QualityPreset::High => QualityArg::High,
            QualityPreset::Low => QualityArg::Low,
        }
    }
}

/// Keys accepted by `config set` and `config get`
pub const VALID_CONFIG_KEYS: &[&str] = &["output_dir", "notify", "quality", "keep_alive_interval"];

pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn bare_invocation_parses() {
        std::env::remove_var("TAPEDECK_OUTPUT_DIR");
        let cli = Cli::parse_from(["tapedeck"]);
        assert!(cli.output_dir.is_none());
        assert!(cli.quality.is_none());
        assert!(!cli.notify);
        assert!(cli.keep_alive_interval.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_output_dir() {
        let cli = Cli::parse_from(["tapedeck", "-o", "/tmp/memos"]);
        assert_eq!(cli.output_dir, Some("/tmp/memos".to_string()));
    }

    #[test]
    fn cli_parses_quality() {
        let cli = Cli::parse_from(["tapedeck", "-q", "low"]);
        assert_eq!(cli.quality, Some(QualityArg::Low));
    }

    #[test]
    fn cli_parses_notify_and_interval() {
        let cli = Cli::parse_from(["tapedeck", "-n", "--keep-alive-interval", "30"]);
        assert!(cli.notify);
        assert_eq!(cli.keep_alive_interval, Some(30));
    }

    #[test]
    fn config_init_parses() {
        let cli = Cli::parse_from(["tapedeck", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn config_set_parses_key_value() {
        let cli = Cli::parse_from(["tapedeck", "config", "set", "quality", "low"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "quality");
            assert_eq!(value, "low");
        } else {
            panic!("config set did not parse");
        }
    }

    #[test]
    fn quality_arg_converts_to_preset() {
        assert_eq!(QualityPreset::from(QualityArg::High), QualityPreset::High);
        assert_eq!(QualityPreset::from(QualityArg::Low), QualityPreset::Low);
    }

    #[test]
    fn to_config_keeps_unset_flags_none() {
        let cli = Cli::parse_from(["tapedeck", "-q", "low"]);
        let config = cli.to_config();
        assert_eq!(config.quality, Some("low".to_string()));
        assert!(config.notify.is_none());
        assert!(config.keep_alive_interval.is_none());
    }

    #[test]
    fn to_config_carries_notify_flag() {
        let cli = Cli::parse_from(["tapedeck", "-n"]);
        assert_eq!(cli.to_config().notify, Some(true));
    }

    #[test]
    fn config_key_whitelist() {
        assert!(is_valid_config_key("output_dir"));
        assert!(is_valid_config_key("notify"));
        assert!(is_valid_config_key("quality"));
        assert!(is_valid_config_key("keep_alive_interval"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
