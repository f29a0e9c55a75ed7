#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use reqwest::StatusCode;
use somberlist::{
    spotify::{Catalog, CatalogError},
    types::{
        Album, AlbumRef, Artist, ArtistRef, AudioFeatures, CandidateTrack,
        CreatePlaylistResponse, CurrentUser, FullTrack, Track,
    },
};

pub fn features(valence: f64, energy: f64, tempo: f64, danceability: f64) -> AudioFeatures {
    AudioFeatures {
        valence,
        energy,
        tempo,
        danceability,
    }
}

pub fn candidate(name: &str, artist: &str, popularity: u32, f: Option<AudioFeatures>) -> CandidateTrack {
    CandidateTrack {
        name: name.to_string(),
        uri: format!("spotify:track:{}", name.to_lowercase().replace(' ', "_")),
        artists: vec![artist.to_string()],
        album: "Album".to_string(),
        release_date: String::new(),
        popularity,
        audio_features: f,
        somber_score: None,
    }
}

pub fn album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        release_date: "2019-03-08".to_string(),
        album_type: "album".to_string(),
    }
}

pub fn album_track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                id: None,
                name: a.to_string(),
            })
            .collect(),
    }
}

pub fn full_track(id: &str, name: &str, artists: &[&str], popularity: u32) -> FullTrack {
    FullTrack {
        id: Some(id.to_string()),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                id: None,
                name: a.to_string(),
            })
            .collect(),
        album: AlbumRef {
            id: None,
            name: "Search Album".to_string(),
        },
        popularity,
    }
}

fn unavailable() -> CatalogError {
    CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE, "unavailable".to_string())
}

/// In-memory catalog that records every write.
#[derive(Default)]
pub struct FakeCatalog {
    pub artists: Vec<Artist>,
    /// keyed by release group
    pub albums: HashMap<String, Vec<Album>>,
    pub album_tracks: HashMap<String, Vec<Track>>,
    pub failing_albums: Vec<String>,
    pub popularity: HashMap<String, u32>,
    pub features: HashMap<String, AudioFeatures>,
    pub fail_details: bool,
    /// keyed by exact query
    pub searches: HashMap<String, Vec<FullTrack>>,
    pub failing_searches: Vec<String>,
    pub fail_add_batches: Vec<usize>,

    pub search_log: Mutex<Vec<String>>,
    pub detail_batches: Mutex<Vec<usize>>,
    pub created: Mutex<Vec<(String, String, bool, String)>>,
    pub added: Mutex<Vec<Vec<String>>>,
}

impl FakeCatalog {
    pub fn add_calls(&self) -> Vec<Vec<String>> {
        self.added.lock().unwrap().clone()
    }

    pub fn created_playlists(&self) -> Vec<(String, String, bool, String)> {
        self.created.lock().unwrap().clone()
    }

    pub fn searched(&self) -> Vec<String> {
        self.search_log.lock().unwrap().clone()
    }
}

impl Catalog for FakeCatalog {
    async fn search_artist(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
        Ok(self
            .artists
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<FullTrack>, CatalogError> {
        self.search_log.lock().unwrap().push(query.to_string());
        if self.failing_searches.iter().any(|q| q == query) {
            return Err(unavailable());
        }
        Ok(self
            .searches
            .get(query)
            .map(|hits| hits.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn artist_albums(
        &self,
        _artist_id: &str,
        album_type: &str,
        _limit: u32,
        _country: &str,
    ) -> Result<Vec<Album>, CatalogError> {
        Ok(self.albums.get(album_type).cloned().unwrap_or_default())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>, CatalogError> {
        if self.failing_albums.iter().any(|a| a == album_id) {
            return Err(unavailable());
        }
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn tracks(&self, ids: &[String]) -> Result<Vec<Option<FullTrack>>, CatalogError> {
        self.detail_batches.lock().unwrap().push(ids.len());
        if self.fail_details {
            return Err(unavailable());
        }
        Ok(ids
            .iter()
            .map(|id| {
                self.popularity
                    .get(id)
                    .map(|p| full_track(id, id, &["Anyone"], *p))
            })
            .collect())
    }

    async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, CatalogError> {
        if self.fail_details {
            return Err(unavailable());
        }
        Ok(ids.iter().map(|id| self.features.get(id).copied()).collect())
    }

    async fn current_user(&self) -> Result<CurrentUser, CatalogError> {
        Ok(CurrentUser {
            id: "listener".to_string(),
            display_name: None,
        })
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        self.created.lock().unwrap().push((
            user_id.to_string(),
            name.to_string(),
            public,
            description.to_string(),
        ));
        Ok(CreatePlaylistResponse {
            id: "playlist123".to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            public: Some(public),
        })
    }

    async fn add_items(&self, _playlist_id: &str, uris: &[String]) -> Result<String, CatalogError> {
        let mut added = self.added.lock().unwrap();
        added.push(uris.to_vec());
        if self.fail_add_batches.contains(&added.len()) {
            return Err(unavailable());
        }
        Ok(format!("snapshot{}", added.len()))
    }
}
