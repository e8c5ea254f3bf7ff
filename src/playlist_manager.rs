use futures_util::future::join_all;
use std::sync::Arc;

use crate::error::{PlaylistError, PlaylistResult};
use crate::models::{AppConfig, Playlist, RecommendedTrack};
use crate::spotify_client::SpotifyApi;
use crate::utils::spotify_url;

/// Materializes a merged track list into a created playlist and enriches
/// each track with its primary artist's top tracks.
pub struct PlaylistManager<C: SpotifyApi> {
    client: Arc<C>,
    config: AppConfig,
}

impl<C: SpotifyApi> PlaylistManager<C> {
    /// Create a new PlaylistManager with an injected API client
    pub fn new(client: Arc<C>, config: AppConfig) -> Self {
        Self { client, config }
    }

    /// Create a playlist from the given tracks and enrich every track with
    /// its artist's top tracks.
    ///
    /// The enrichment fetches are all fired before any is awaited; a
    /// failure in one of them degrades that track's `top_tracks` to empty
    /// instead of failing the whole playlist.
    pub async fn create_playlist(
        &self,
        tracks: Vec<RecommendedTrack>,
    ) -> PlaylistResult<Playlist> {
        if tracks.is_empty() {
            return Err(PlaylistError::EmptyResult);
        }

        let user = self.client.get_current_user().await?;

        let created = self
            .client
            .create_playlist(
                &user.id,
                &self.config.playlist_name,
                &self.config.playlist_description,
                self.config.playlist_public,
            )
            .await?;

        let uris = spotify_url::track_uris(&tracks);
        self.client
            .add_tracks_to_playlist(&created.id, &uris)
            .await?;

        log::info!(
            "Created playlist '{}' ({}) with {} tracks",
            self.config.playlist_name,
            created.id,
            tracks.len()
        );

        let enriched = self.enrich_tracks(tracks, &user.country).await;

        Ok(Playlist {
            id: created.id,
            tracks: enriched,
        })
    }

    /// Add a single track to a previously created playlist
    pub async fn add_track(&self, playlist_id: &str, track_id: &str) -> PlaylistResult<()> {
        let uri = spotify_url::track_id_to_uri(track_id);
        self.client
            .add_tracks_to_playlist(playlist_id, &[uri])
            .await?;
        Ok(())
    }

    /// Remove a single track from a previously created playlist
    pub async fn remove_track(&self, playlist_id: &str, track_id: &str) -> PlaylistResult<()> {
        let uri = spotify_url::track_id_to_uri(track_id);
        self.client
            .remove_tracks_from_playlist(playlist_id, &[uri])
            .await?;
        Ok(())
    }

    async fn enrich_tracks(
        &self,
        tracks: Vec<RecommendedTrack>,
        country: &str,
    ) -> Vec<RecommendedTrack> {
        let fetches = tracks
            .into_iter()
            .map(|track| self.enrich_track(track, country));
        join_all(fetches).await
    }

    /// Attach the primary artist's top tracks to one track. Failures are
    /// isolated: the track comes back with empty `top_tracks`.
    async fn enrich_track(&self, mut track: RecommendedTrack, country: &str) -> RecommendedTrack {
        let artist = match track.primary_artist() {
            Some(artist) => artist.clone(),
            None => {
                log::warn!("Track '{}' has no artist to enrich from", track.name);
                return track;
            }
        };

        match self.client.get_artist_top_tracks(&artist.id, country).await {
            Ok(top_tracks) => track.top_tracks = top_tracks,
            Err(e) => {
                log::warn!(
                    "Failed to fetch top tracks for artist '{}': {}",
                    artist.name,
                    e
                );
                track.top_tracks = Vec::new();
            }
        }

        track
    }
}
