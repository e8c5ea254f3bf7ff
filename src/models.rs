use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Which seed parameter a batch of ids populates on a recommendations request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedCategory {
    /// Seeds are track ids, sent as `seed_tracks`
    Tracks,
    /// Seeds are artist ids, sent as `seed_artists`
    Artists,
}

impl SeedCategory {
    /// Query parameter name used by the recommendations endpoint
    pub fn api_param(&self) -> &'static str {
        match self {
            SeedCategory::Tracks => "seed_tracks",
            SeedCategory::Artists => "seed_artists",
        }
    }
}

/// A single recommendations call: at most 5 seeds and a share of the
/// overall target length.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub category: SeedCategory,
    pub seeds: Vec<String>,
    pub limit: u32,
}

/// Artist entry as it appears inside a track record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// Track record returned by the recommendations and top-items endpoints.
/// `top_tracks` is filled in locally during playlist assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedTrack {
    /// Spotify track ID
    pub id: String,
    /// Spotify track URI (e.g., "spotify:track:...")
    pub uri: String,
    /// Track name
    pub name: String,
    /// Artists credited on the track
    pub artists: Vec<ArtistRef>,
    /// Track duration in milliseconds
    #[serde(default)]
    pub duration_ms: u32,
    /// Top tracks of the primary artist, attached after enrichment
    #[serde(default)]
    pub top_tracks: Vec<RecommendedTrack>,
}

impl RecommendedTrack {
    /// Get the primary (first-credited) artist
    pub fn primary_artist(&self) -> Option<&ArtistRef> {
        self.artists.first()
    }

    /// Get all artist names as a comma-separated string
    pub fn artists_string(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Artist entry from the top-items endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Paged container used by the top-items endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

/// Response body of the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<RecommendedTrack>,
}

/// Response body of the artist top-tracks endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistTopTracksResponse {
    pub tracks: Vec<RecommendedTrack>,
}

/// Current user profile; `country` scopes the top-tracks lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub country: String,
}

/// Playlist record returned by the create-playlist endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
}

/// An assembled playlist: the id assigned by Spotify plus the tracks
/// that were added to it, in order.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: String,
    pub tracks: Vec<RecommendedTrack>,
}

impl Playlist {
    /// Get the number of tracks in the playlist
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

/// How top-item seeds are gathered for recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationsMethod {
    /// Seed entirely from top artists
    OnlyArtist,
    /// Seed from both top tracks and top artists
    Split,
    /// Seed entirely from top tracks
    OnlyTrack,
}

impl RecommendationsMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationsMethod::OnlyArtist => "onlyArtist",
            RecommendationsMethod::Split => "split",
            RecommendationsMethod::OnlyTrack => "onlyTrack",
        }
    }
}

impl FromStr for RecommendationsMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onlyArtist" => Ok(RecommendationsMethod::OnlyArtist),
            "split" => Ok(RecommendationsMethod::Split),
            "onlyTrack" => Ok(RecommendationsMethod::OnlyTrack),
            _ => Err(ConfigError::InvalidValue {
                field: "RECOMMENDATIONS_METHOD".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Time range understood by the top-items endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl FromStr for TimeRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term" => Ok(TimeRange::ShortTerm),
            "medium_term" => Ok(TimeRange::MediumTerm),
            "long_term" => Ok(TimeRange::LongTerm),
            _ => Err(ConfigError::InvalidValue {
                field: "TIME_RANGE".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for the playlist generator
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Spotify client ID
    pub spotify_client_id: String,
    /// Spotify client secret
    pub spotify_client_secret: String,
    /// Spotify refresh token for long-term access
    pub spotify_refresh_token: String,
    /// How seeds are gathered for recommendations
    pub recommendations_method: RecommendationsMethod,
    /// Number of top items to fetch as seeds
    pub use_top_tracks: u32,
    /// Time range for the top-items queries
    pub time_range: TimeRange,
    /// Target number of tracks for the generated playlist
    pub playlist_length: u32,
    /// Name of the created playlist
    pub playlist_name: String,
    /// Description of the created playlist
    pub playlist_description: String,
    /// Whether the created playlist is public
    pub playlist_public: bool,
}

impl AppConfig {
    /// Validate that all required fields are set
    pub fn validate(&self) -> Result<(), String> {
        if self.spotify_client_id.is_empty() {
            return Err("Spotify client ID is required".to_string());
        }
        if self.spotify_client_secret.is_empty() {
            return Err("Spotify client secret is required".to_string());
        }
        if self.spotify_refresh_token.is_empty() {
            return Err("Spotify refresh token is required".to_string());
        }
        if self.use_top_tracks == 0 {
            return Err("Top item count must be greater than 0".to_string());
        }
        if self.playlist_length == 0 {
            return Err("Playlist length must be greater than 0".to_string());
        }
        if self.playlist_name.is_empty() {
            return Err("Playlist name is required".to_string());
        }
        Ok(())
    }
}
