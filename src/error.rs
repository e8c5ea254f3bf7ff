use thiserror::Error;

/// Main error type for the playlist generator
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Spotify error: {0}")]
    Spotify(#[from] SpotifyError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Recommendation error: {0}")]
    Recommendation(#[from] RecommendationError),
    #[error("Playlist error: {0}")]
    Playlist(#[from] PlaylistError),
}

/// Spotify API client errors
#[derive(Debug, Clone, Error)]
pub enum SpotifyError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Session expired, re-authentication required")]
    SessionExpired,
    #[error("API request failed: {status} - {message}")]
    ApiRequestFailed { status: u16, message: String },
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("JSON parsing error: {0}")]
    JsonParsingError(String),
}

impl From<reqwest::Error> for SpotifyError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SpotifyError::JsonParsingError(error.to_string())
        } else {
            SpotifyError::NetworkError(error.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {var_name}")]
    MissingEnvironmentVariable { var_name: String },
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Recommendation gathering errors
#[derive(Debug, Clone, Error)]
pub enum RecommendationError {
    #[error("No tracks returned for any seed category")]
    EmptyResult,
    #[error("Spotify error: {0}")]
    Spotify(#[from] SpotifyError),
}

/// Playlist assembly errors
#[derive(Debug, Clone, Error)]
pub enum PlaylistError {
    #[error("Cannot create a playlist from an empty track list")]
    EmptyResult,
    #[error("Spotify error: {0}")]
    Spotify(#[from] SpotifyError),
}

/// Result type alias for top-level operations
pub type AppResult<T> = Result<T, AppError>;

/// Result type aliases for specific error types
pub type SpotifyResult<T> = Result<T, SpotifyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RecommendationResult<T> = Result<T, RecommendationError>;
pub type PlaylistResult<T> = Result<T, PlaylistError>;
