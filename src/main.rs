use std::sync::Arc;

use tastemaker::config::load_config_with_details;
use tastemaker::error::AppResult;
use tastemaker::playlist_manager::PlaylistManager;
use tastemaker::recommendation_generator::RecommendationGenerator;
use tastemaker::spotify_client::SpotifyClient;

async fn run() -> AppResult<()> {
    let config = load_config_with_details()?;

    let client = Arc::new(
        SpotifyClient::connect(
            &config.spotify_client_id,
            &config.spotify_client_secret,
            &config.spotify_refresh_token,
        )
        .await?,
    );

    let generator = RecommendationGenerator::new(client.clone(), config.clone());
    let tracks = generator.recommend().await?;

    let manager = PlaylistManager::new(client, config.clone());
    let playlist = manager.create_playlist(tracks).await?;

    log::info!(
        "Playlist '{}' created with {} tracks",
        config.playlist_name,
        playlist.track_count()
    );
    println!(
        "Created playlist {} ({} tracks)",
        playlist.id,
        playlist.track_count()
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    // Initialize logging
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
