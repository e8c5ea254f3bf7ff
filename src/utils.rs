/// Utility functions for working with Spotify URIs
pub mod spotify_url {
    use crate::models::RecommendedTrack;

    /// Convert a track ID to a Spotify URI
    pub fn track_id_to_uri(track_id: &str) -> String {
        format!("spotify:track:{}", track_id)
    }

    /// Collect the URIs of a track list, in order
    pub fn track_uris(tracks: &[RecommendedTrack]) -> Vec<String> {
        tracks.iter().map(|t| t.uri.clone()).collect()
    }
}
