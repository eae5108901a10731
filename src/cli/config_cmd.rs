//! Config subcommand handlers

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::recording::QualityPreset;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Dispatch a config action against the given store
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Created config file at {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Reject unknown keys and bad values before touching the file
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys are: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "output_dir" => config.output_dir = Some(value.to_string()),
        "notify" => {
            config.notify = Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Expected 'true' or 'false'".to_string(),
            })?)
        }
        "quality" => config.quality = Some(value.to_string()),
        "keep_alive_interval" => {
            config.keep_alive_interval =
                Some(value.parse().map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a whole number of seconds".to_string(),
                })?)
        }
        _ => unreachable!(), // key checked above
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys are: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "output_dir" => config.output_dir,
        "notify" => config.notify.map(|b| b.to_string()),
        "quality" => config.quality,
        "keep_alive_interval" => config.keep_alive_interval.map(|n| n.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "output_dir",
        config.output_dir.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "notify",
        &config
            .notify
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value("quality", config.quality.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "keep_alive_interval",
        &config
            .keep_alive_interval
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Check that a value parses for the key it is being assigned to
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "quality" => {
            value
                .parse::<QualityPreset>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "notify" => {
            parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Expected 'true' or 'false'".to_string(),
            })?;
        }
        "keep_alive_interval" => {
            let secs = value
                .parse::<u64>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a whole number of seconds".to_string(),
                })?;
            if secs == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Interval must be at least 1 second".to_string(),
                });
            }
        }
        _ => {} // output_dir accepts any path
    }
    Ok(())
}

/// Parse a user-supplied boolean
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
