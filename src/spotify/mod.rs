//! # Spotify Integration Module
//!
//! Everything Somberlist needs from the Spotify Web API, behind one seam.
//!
//! ```text
//! Pipeline (discovery, supplement, resolution, upload)
//!          ↓
//!     Catalog trait
//!          ↓
//! SpotifyClient (reqwest, rate limiter, token manager)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 authorization code flow with PKCE
//! - [`client`] - [`SpotifyClient`], the reqwest implementation of [`Catalog`]
//! - [`rate_limit`] - Adaptive pacing between requests
//!
//! ## API Coverage
//!
//! - `GET /search` - Artist and track search
//! - `GET /artists/{id}/albums` - Discography per release group, paginated
//! - `GET /albums/{id}/tracks` - Album track listing, paginated
//! - `GET /tracks` - Popularity for up to 50 tracks
//! - `GET /audio-features` - Audio features for up to 50 tracks
//! - `GET /me` - Current user
//! - `POST /users/{user_id}/playlists` - Create playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add up to 100 items
//!
//! ## Error Handling
//!
//! Every call returns [`CatalogError`]. `429` responses are retried after the
//! server-signalled `Retry-After` delay and `502` responses after a short pause,
//! both a bounded number of times. Everything else is handed back to the
//! pipeline, which logs it and moves on to the next item.

use std::fmt;

use reqwest::StatusCode;

use crate::types::{
    Album, Artist, AudioFeatures, CreatePlaylistResponse, CurrentUser, FullTrack, Track,
};

pub mod auth;
pub mod client;
pub mod rate_limit;

pub use client::SpotifyClient;

/// Spotify's limit for `/tracks` and `/audio-features`.
pub const MAX_IDS_PER_REQUEST: usize = 50;
/// Spotify's limit for adding items to a playlist.
pub const MAX_URIS_PER_REQUEST: usize = 100;

#[derive(Debug)]
pub enum CatalogError {
    Http(reqwest::Error),
    Status(StatusCode, String),
    RateLimited(u64),
    Auth(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Http(e) => write!(f, "request failed: {}", e),
            CatalogError::Status(status, body) => write!(f, "{}: {}", status, body),
            CatalogError::RateLimited(secs) => {
                write!(f, "rate limited, retry after {} seconds", secs)
            }
            CatalogError::Auth(msg) => write!(f, "authentication failed: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Http(err)
    }
}

/// The catalog operations the playlist builders consume.
///
/// Batch operations return one entry per requested id, in request order, with
/// `None` where the catalog has nothing for that id.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    async fn search_artist(&self, name: &str) -> Result<Option<Artist>, CatalogError>;

    async fn search_tracks(&self, query: &str, limit: u32)
    -> Result<Vec<FullTrack>, CatalogError>;

    /// All releases of one group (`album`, `single`, `appears_on`, ...), every page.
    async fn artist_albums(
        &self,
        artist_id: &str,
        album_type: &str,
        limit: u32,
        country: &str,
    ) -> Result<Vec<Album>, CatalogError>;

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>, CatalogError>;

    async fn tracks(&self, ids: &[String]) -> Result<Vec<Option<FullTrack>>, CatalogError>;

    async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, CatalogError>;

    async fn current_user(&self) -> Result<CurrentUser, CatalogError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<CreatePlaylistResponse, CatalogError>;

    /// Appends at most [`MAX_URIS_PER_REQUEST`] items; returns the snapshot id.
    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<String, CatalogError>;
}
