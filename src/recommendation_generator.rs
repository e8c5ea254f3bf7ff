use std::sync::Arc;

use crate::error::{RecommendationError, RecommendationResult};
use crate::models::{AppConfig, RecommendationsMethod, RecommendedTrack, SeedCategory};
use crate::seed_allocator;
use crate::spotify_client::SpotifyApi;

/// Gathers top-item seeds, batches them through the seed allocator and
/// merges the recommendation responses into one track list.
pub struct RecommendationGenerator<C: SpotifyApi> {
    client: Arc<C>,
    config: AppConfig,
}

impl<C: SpotifyApi> RecommendationGenerator<C> {
    /// Create a new RecommendationGenerator with an injected API client
    pub fn new(client: Arc<C>, config: AppConfig) -> Self {
        Self { client, config }
    }

    /// Gather recommendations according to the configured method.
    ///
    /// Tracks are concatenated in request-issue order; duplicates across
    /// seed categories are kept as returned.
    pub async fn recommend(&self) -> RecommendationResult<Vec<RecommendedTrack>> {
        let seed_count = self.config.use_top_tracks;
        let target_length = self.config.playlist_length;

        log::info!(
            "Gathering recommendations ({} method, {} seeds, {} tracks target)",
            self.config.recommendations_method.as_str(),
            seed_count,
            target_length
        );

        let mut merged = Vec::new();

        match self.config.recommendations_method {
            RecommendationsMethod::OnlyArtist => {
                let seeds = self.fetch_artist_seeds(seed_count).await?;
                self.gather(&seeds, SeedCategory::Artists, target_length, &mut merged)
                    .await?;
            }
            RecommendationsMethod::Split => {
                // Top items and target length both split down the middle,
                // tracks taking the odd one out.
                let track_seed_count = (seed_count + 1) / 2;
                let artist_seed_count = seed_count - track_seed_count;
                let track_limit = (target_length + 1) / 2;
                let artist_limit = target_length / 2;

                let track_seeds = self.fetch_track_seeds(track_seed_count).await?;
                self.gather(&track_seeds, SeedCategory::Tracks, track_limit, &mut merged)
                    .await?;

                if artist_seed_count > 0 {
                    let artist_seeds = self.fetch_artist_seeds(artist_seed_count).await?;
                    self.gather(&artist_seeds, SeedCategory::Artists, artist_limit, &mut merged)
                        .await?;
                }
            }
            RecommendationsMethod::OnlyTrack => {
                let seeds = self.fetch_track_seeds(seed_count).await?;
                self.gather(&seeds, SeedCategory::Tracks, target_length, &mut merged)
                    .await?;
            }
        }

        if merged.is_empty() {
            return Err(RecommendationError::EmptyResult);
        }

        log::info!("Gathered {} recommended tracks", merged.len());
        Ok(merged)
    }

    async fn fetch_track_seeds(&self, count: u32) -> RecommendationResult<Vec<String>> {
        let tracks = self
            .client
            .get_top_tracks(count, self.config.time_range)
            .await?;
        Ok(tracks.into_iter().map(|t| t.id).collect())
    }

    async fn fetch_artist_seeds(&self, count: u32) -> RecommendationResult<Vec<String>> {
        let artists = self
            .client
            .get_top_artists(count, self.config.time_range)
            .await?;
        Ok(artists.into_iter().map(|a| a.id).collect())
    }

    /// Run one seed category: batch the seeds, issue a recommendations call
    /// per batch and append the returned tracks to `merged`.
    async fn gather(
        &self,
        seeds: &[String],
        category: SeedCategory,
        total_limit: u32,
        merged: &mut Vec<RecommendedTrack>,
    ) -> RecommendationResult<()> {
        if seeds.is_empty() {
            log::warn!("No {} seeds available, skipping category", category.api_param());
            return Ok(());
        }

        for request in seed_allocator::allocate(seeds, category, total_limit) {
            let response = self.client.get_recommendations(&request).await?;
            log::debug!(
                "{} request with {} seeds returned {} tracks",
                request.category.api_param(),
                request.seeds.len(),
                response.tracks.len()
            );
            merged.extend(response.tracks);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SpotifyError, SpotifyResult};
    use crate::models::{
        ArtistRef, CreatedPlaylist, RecommendationRequest, RecommendationsResponse, TimeRange,
        TopArtist, UserProfile,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Recording double for the Spotify API: serves synthetic top items
    /// and recommendations, remembering every call it receives.
    struct MockSpotify {
        empty_recommendations: bool,
        top_track_calls: Mutex<Vec<(u32, TimeRange)>>,
        top_artist_calls: Mutex<Vec<(u32, TimeRange)>>,
        recommendation_calls: Mutex<Vec<RecommendationRequest>>,
    }

    impl MockSpotify {
        fn new() -> Self {
            Self {
                empty_recommendations: false,
                top_track_calls: Mutex::new(Vec::new()),
                top_artist_calls: Mutex::new(Vec::new()),
                recommendation_calls: Mutex::new(Vec::new()),
            }
        }

        fn with_empty_recommendations() -> Self {
            Self {
                empty_recommendations: true,
                ..Self::new()
            }
        }

        fn track(id: &str) -> RecommendedTrack {
            RecommendedTrack {
                id: id.to_string(),
                uri: format!("spotify:track:{}", id),
                name: id.to_string(),
                artists: vec![ArtistRef {
                    id: format!("{}-artist", id),
                    name: format!("{} artist", id),
                }],
                duration_ms: 180_000,
                top_tracks: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl SpotifyApi for MockSpotify {
        async fn get_top_artists(
            &self,
            limit: u32,
            time_range: TimeRange,
        ) -> SpotifyResult<Vec<TopArtist>> {
            self.top_artist_calls
                .lock()
                .unwrap()
                .push((limit, time_range));
            Ok((0..limit)
                .map(|i| TopArtist {
                    id: format!("top-artist-{}", i),
                    name: format!("Top Artist {}", i),
                    genres: Vec::new(),
                })
                .collect())
        }

        async fn get_top_tracks(
            &self,
            limit: u32,
            time_range: TimeRange,
        ) -> SpotifyResult<Vec<RecommendedTrack>> {
            self.top_track_calls
                .lock()
                .unwrap()
                .push((limit, time_range));
            Ok((0..limit)
                .map(|i| Self::track(&format!("top-track-{}", i)))
                .collect())
        }

        async fn get_recommendations(
            &self,
            request: &RecommendationRequest,
        ) -> SpotifyResult<RecommendationsResponse> {
            self.recommendation_calls
                .lock()
                .unwrap()
                .push(request.clone());

            let tracks = if self.empty_recommendations {
                Vec::new()
            } else {
                (0..request.limit)
                    .map(|i| Self::track(&format!("{}-rec-{}", request.category.api_param(), i)))
                    .collect()
            };
            Ok(RecommendationsResponse { tracks })
        }

        async fn get_current_user(&self) -> SpotifyResult<UserProfile> {
            Err(SpotifyError::ApiRequestFailed {
                status: 500,
                message: "not used by these tests".to_string(),
            })
        }

        async fn create_playlist(
            &self,
            _user_id: &str,
            _name: &str,
            _description: &str,
            _public: bool,
        ) -> SpotifyResult<CreatedPlaylist> {
            unreachable!("playlist creation is not exercised here")
        }

        async fn add_tracks_to_playlist(
            &self,
            _playlist_id: &str,
            _track_uris: &[String],
        ) -> SpotifyResult<()> {
            unreachable!("playlist creation is not exercised here")
        }

        async fn remove_tracks_from_playlist(
            &self,
            _playlist_id: &str,
            _track_uris: &[String],
        ) -> SpotifyResult<()> {
            unreachable!("playlist creation is not exercised here")
        }

        async fn get_artist_top_tracks(
            &self,
            _artist_id: &str,
            _country: &str,
        ) -> SpotifyResult<Vec<RecommendedTrack>> {
            unreachable!("enrichment is not exercised here")
        }
    }

    fn config(method: RecommendationsMethod, use_top_tracks: u32, playlist_length: u32) -> AppConfig {
        AppConfig {
            spotify_client_id: "id".to_string(),
            spotify_client_secret: "secret".to_string(),
            spotify_refresh_token: "refresh".to_string(),
            recommendations_method: method,
            use_top_tracks,
            time_range: TimeRange::MediumTerm,
            playlist_length,
            playlist_name: "Test Mix".to_string(),
            playlist_description: "test".to_string(),
            playlist_public: false,
        }
    }

    #[tokio::test]
    async fn test_split_divides_seed_fetches() {
        let client = Arc::new(MockSpotify::new());
        let generator = RecommendationGenerator::new(
            client.clone(),
            config(RecommendationsMethod::Split, 7, 10),
        );

        generator.recommend().await.unwrap();

        // ceil(7/2) = 4 top tracks, the remaining 3 as top artists
        assert_eq!(
            *client.top_track_calls.lock().unwrap(),
            vec![(4, TimeRange::MediumTerm)]
        );
        assert_eq!(
            *client.top_artist_calls.lock().unwrap(),
            vec![(3, TimeRange::MediumTerm)]
        );
    }

    #[tokio::test]
    async fn test_split_divides_target_length() {
        let client = Arc::new(MockSpotify::new());
        let generator = RecommendationGenerator::new(
            client.clone(),
            config(RecommendationsMethod::Split, 7, 10),
        );

        let tracks = generator.recommend().await.unwrap();

        let calls = client.recommendation_calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].category, SeedCategory::Tracks);
        assert_eq!(calls[0].limit, 5);
        assert_eq!(calls[1].category, SeedCategory::Artists);
        assert_eq!(calls[1].limit, 5);

        // Concatenated in request-issue order: track-seeded first
        assert_eq!(tracks.len(), 10);
        assert!(tracks[0].id.starts_with("seed_tracks-rec"));
        assert!(tracks[9].id.starts_with("seed_artists-rec"));
    }

    #[tokio::test]
    async fn test_only_artist_skips_top_tracks() {
        let client = Arc::new(MockSpotify::new());
        let generator = RecommendationGenerator::new(
            client.clone(),
            config(RecommendationsMethod::OnlyArtist, 5, 20),
        );

        let tracks = generator.recommend().await.unwrap();

        assert!(client.top_track_calls.lock().unwrap().is_empty());
        assert_eq!(client.top_artist_calls.lock().unwrap().len(), 1);

        let calls = client.recommendation_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].category, SeedCategory::Artists);
        assert_eq!(calls[0].limit, 20);
        assert_eq!(tracks.len(), 20);
    }

    #[tokio::test]
    async fn test_only_track_skips_top_artists() {
        let client = Arc::new(MockSpotify::new());
        let generator = RecommendationGenerator::new(
            client.clone(),
            config(RecommendationsMethod::OnlyTrack, 5, 20),
        );

        generator.recommend().await.unwrap();

        assert!(client.top_artist_calls.lock().unwrap().is_empty());
        assert_eq!(client.top_track_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_split_with_single_seed_skips_artist_branch() {
        let client = Arc::new(MockSpotify::new());
        let generator = RecommendationGenerator::new(
            client.clone(),
            config(RecommendationsMethod::Split, 1, 10),
        );

        generator.recommend().await.unwrap();

        // ceil(1/2) = 1 track seed, 0 artist seeds: no artist fetch at all
        assert_eq!(
            *client.top_track_calls.lock().unwrap(),
            vec![(1, TimeRange::MediumTerm)]
        );
        assert!(client.top_artist_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_long_seed_list_is_batched() {
        let client = Arc::new(MockSpotify::new());
        let generator = RecommendationGenerator::new(
            client.clone(),
            config(RecommendationsMethod::OnlyTrack, 12, 30),
        );

        let tracks = generator.recommend().await.unwrap();

        // 12 seeds, target 30: two full batches of 5 seeds at limit 15,
        // the 2-seed remainder is skipped with no budget left.
        let calls = client.recommendation_calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].seeds.len(), 5);
        assert_eq!(calls[1].seeds.len(), 5);
        assert_eq!(calls[0].limit, 15);
        assert_eq!(calls[1].limit, 15);
        assert_eq!(tracks.len(), 30);
    }

    #[tokio::test]
    async fn test_empty_recommendations_surface_as_error() {
        let client = Arc::new(MockSpotify::with_empty_recommendations());
        let generator = RecommendationGenerator::new(
            client,
            config(RecommendationsMethod::OnlyTrack, 5, 20),
        );

        let result = generator.recommend().await;
        assert!(matches!(result, Err(RecommendationError::EmptyResult)));
    }
}
