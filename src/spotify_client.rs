use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{SpotifyError, SpotifyResult};
use crate::models::{
    ArtistTopTracksResponse, CreatedPlaylist, Paging, RecommendationRequest,
    RecommendationsResponse, RecommendedTrack, TimeRange, TopArtist, UserProfile,
};

const API_URL: &str = "https://api.spotify.com/v1";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// The Spotify Web API surface consumed by the generator. Implemented by
/// [`SpotifyClient`] against the real service and by recording doubles in
/// tests.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Get the user's top artists for a time range
    async fn get_top_artists(&self, limit: u32, time_range: TimeRange)
        -> SpotifyResult<Vec<TopArtist>>;

    /// Get the user's top tracks for a time range
    async fn get_top_tracks(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> SpotifyResult<Vec<RecommendedTrack>>;

    /// Get recommendations for a single seed batch
    async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> SpotifyResult<RecommendationsResponse>;

    /// Get the current user's profile
    async fn get_current_user(&self) -> SpotifyResult<UserProfile>;

    /// Create a playlist owned by the given user
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> SpotifyResult<CreatedPlaylist>;

    /// Add tracks (as URIs) to a playlist
    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> SpotifyResult<()>;

    /// Remove tracks (as URIs) from a playlist
    async fn remove_tracks_from_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> SpotifyResult<()>;

    /// Get an artist's top tracks in the given country
    async fn get_artist_top_tracks(
        &self,
        artist_id: &str,
        country: &str,
    ) -> SpotifyResult<Vec<RecommendedTrack>>;
}

/// Reqwest-backed Spotify Web API client holding a bearer token obtained
/// from the refresh-token grant.
pub struct SpotifyClient {
    http_client: Client,
    access_token: String,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl SpotifyClient {
    /// Exchange the configured refresh token for an access token and build
    /// a ready-to-use client.
    pub async fn connect(
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> SpotifyResult<SpotifyClient> {
        let http_client = Client::new();
        let access_token =
            Self::refresh_access_token(&http_client, client_id, client_secret, refresh_token)
                .await?;

        log::info!("Spotify access token obtained");
        Ok(SpotifyClient {
            http_client,
            access_token,
        })
    }

    async fn refresh_access_token(
        http_client: &Client,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> SpotifyResult<String> {
        let basic = BASE64.encode(format!("{}:{}", client_id, client_secret));

        let response = http_client
            .post(TOKEN_URL)
            .header(AUTHORIZATION, format!("Basic {}", basic))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(SpotifyError::AuthenticationFailed(format!(
                "token endpoint returned {}: {}",
                status, message
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    fn build_headers(&self) -> SpotifyResult<HeaderMap> {
        let authorization = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|e| SpotifyError::AuthenticationFailed(e.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Map a non-success status to the matching error. 401 means the token
    /// is no longer valid; re-authentication is the caller's concern.
    async fn check_status(response: reqwest::Response) -> SpotifyResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(SpotifyError::SessionExpired);
        }

        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(SpotifyError::ApiRequestFailed { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> SpotifyResult<T> {
        let response = self
            .http_client
            .get(endpoint)
            .headers(self.build_headers()?)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> SpotifyResult<T> {
        let response = self
            .http_client
            .post(endpoint)
            .headers(self.build_headers()?)
            .json(body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn get_top_artists(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> SpotifyResult<Vec<TopArtist>> {
        let endpoint = format!(
            "{}/me/top/artists?limit={}&time_range={}",
            API_URL,
            limit,
            time_range.as_str()
        );
        let page: Paging<TopArtist> = self.get_json(&endpoint).await?;
        Ok(page.items)
    }

    async fn get_top_tracks(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> SpotifyResult<Vec<RecommendedTrack>> {
        let endpoint = format!(
            "{}/me/top/tracks?limit={}&time_range={}",
            API_URL,
            limit,
            time_range.as_str()
        );
        let page: Paging<RecommendedTrack> = self.get_json(&endpoint).await?;
        Ok(page.items)
    }

    async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> SpotifyResult<RecommendationsResponse> {
        let endpoint = format!(
            "{}/recommendations?limit={}&{}={}",
            API_URL,
            request.limit,
            request.category.api_param(),
            request.seeds.join(",")
        );
        self.get_json(&endpoint).await
    }

    async fn get_current_user(&self) -> SpotifyResult<UserProfile> {
        let endpoint = format!("{}/me", API_URL);
        self.get_json(&endpoint).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> SpotifyResult<CreatedPlaylist> {
        let endpoint = format!("{}/users/{}/playlists", API_URL, user_id);
        let body = json!({
            "name": name,
            "description": description,
            "public": public,
        });
        self.post_json(&endpoint, &body).await
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> SpotifyResult<()> {
        let endpoint = format!("{}/playlists/{}/tracks", API_URL, playlist_id);
        let body = json!({ "uris": track_uris });

        let response = self
            .http_client
            .post(&endpoint)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn remove_tracks_from_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> SpotifyResult<()> {
        let endpoint = format!("{}/playlists/{}/tracks", API_URL, playlist_id);
        let tracks: Vec<serde_json::Value> =
            track_uris.iter().map(|uri| json!({ "uri": uri })).collect();
        let body = json!({ "tracks": tracks });

        let response = self
            .http_client
            .delete(&endpoint)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn get_artist_top_tracks(
        &self,
        artist_id: &str,
        country: &str,
    ) -> SpotifyResult<Vec<RecommendedTrack>> {
        let endpoint = format!(
            "{}/artists/{}/top-tracks?market={}",
            API_URL, artist_id, country
        );
        let response: ArtistTopTracksResponse = self.get_json(&endpoint).await?;
        Ok(response.tracks)
    }
}
