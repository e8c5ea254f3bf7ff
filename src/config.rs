use crate::error::{ConfigError, ConfigResult};
use crate::models::{AppConfig, RecommendationsMethod, TimeRange};
use std::env;

/// Load configuration from environment variables
pub fn load_config() -> ConfigResult<AppConfig> {
    let spotify_client_id = require_var("SPOTIFY_CLIENT_ID")?;
    let spotify_client_secret = require_var("SPOTIFY_CLIENT_SECRET")?;
    let spotify_refresh_token = require_var("SPOTIFY_REFRESH_TOKEN")?;

    // Optional configuration with defaults
    let recommendations_method = env::var("RECOMMENDATIONS_METHOD")
        .unwrap_or_else(|_| "onlyTrack".to_string())
        .parse::<RecommendationsMethod>()?;

    let time_range = env::var("TIME_RANGE")
        .unwrap_or_else(|_| "medium_term".to_string())
        .parse::<TimeRange>()?;

    let use_top_tracks = parse_var("USE_TOP_TRACKS", "5")?;
    let playlist_length = parse_var("PLAYLIST_LENGTH", "20")?;

    let playlist_name =
        env::var("PLAYLIST_NAME").unwrap_or_else(|_| "Discovery Mix".to_string());
    let playlist_description = env::var("PLAYLIST_DESCRIPTION")
        .unwrap_or_else(|_| "Generated from your listening taste".to_string());

    let playlist_public = env::var("PLAYLIST_PUBLIC")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .map_err(|_| ConfigError::InvalidValue {
            field: "PLAYLIST_PUBLIC".to_string(),
            value: env::var("PLAYLIST_PUBLIC").unwrap_or_default(),
        })?;

    let config = AppConfig {
        spotify_client_id,
        spotify_client_secret,
        spotify_refresh_token,
        recommendations_method,
        use_top_tracks,
        time_range,
        playlist_length,
        playlist_name,
        playlist_description,
        playlist_public,
    };

    config
        .validate()
        .map_err(ConfigError::ValidationFailed)?;

    Ok(config)
}

/// Load configuration with detailed error reporting
pub fn load_config_with_details() -> ConfigResult<AppConfig> {
    match load_config() {
        Ok(config) => {
            log::info!("Configuration loaded successfully");
            log::debug!(
                "Method: {}, seeds: {}, time range: {}, target length: {}",
                config.recommendations_method.as_str(),
                config.use_top_tracks,
                config.time_range.as_str(),
                config.playlist_length
            );
            Ok(config)
        }
        Err(e) => {
            log::error!("Failed to load configuration: {:?}", e);
            match &e {
                ConfigError::MissingEnvironmentVariable { var_name } => {
                    log::error!("Please set the {} environment variable", var_name);
                }
                ConfigError::InvalidValue { field, value } => {
                    log::error!("Invalid value '{}' for field '{}'", value, field);
                }
                ConfigError::ValidationFailed(msg) => {
                    log::error!("Configuration validation failed: {}", msg);
                }
            }
            Err(e)
        }
    }
}

fn require_var(var_name: &str) -> ConfigResult<String> {
    env::var(var_name).map_err(|_| ConfigError::MissingEnvironmentVariable {
        var_name: var_name.to_string(),
    })
}

fn parse_var(var_name: &str, default: &str) -> ConfigResult<u32> {
    env::var(var_name)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidValue {
            field: var_name.to_string(),
            value: env::var(var_name).unwrap_or_default(),
        })
}
