//! Generates a discovery playlist from a listener's Spotify taste profile:
//! fetches top artists/tracks, requests recommendations seeded from them
//! (batched to the API's 5-seed quota), and assembles the result into a
//! playlist enriched with each artist's top tracks.

pub mod config;
pub mod error;
pub mod models;
pub mod playlist_manager;
pub mod recommendation_generator;
pub mod seed_allocator;
pub mod spotify_client;
pub mod utils;
