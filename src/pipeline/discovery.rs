use std::collections::HashSet;

use crate::{
    pipeline::progress_bar,
    selector,
    spotify::{Catalog, CatalogError, MAX_IDS_PER_REQUEST},
    types::{Album, Artist, CandidateTrack},
    utils, warning,
};

/// Release groups walked for an artist, in this order.
pub const RELEASE_GROUPS: [&str; 3] = ["album", "single", "appears_on"];
pub const ALBUMS_PER_PAGE: u32 = 50;

pub async fn find_artist<C: Catalog>(
    catalog: &C,
    name: &str,
) -> Result<Option<Artist>, CatalogError> {
    catalog.search_artist(name).await
}

/// Every release of the artist across [`RELEASE_GROUPS`].
///
/// A group that fails to load is reported and skipped.
pub async fn collect_albums<C: Catalog>(catalog: &C, artist_id: &str, market: &str) -> Vec<Album> {
    let mut albums = Vec::new();
    for group in RELEASE_GROUPS {
        match catalog
            .artist_albums(artist_id, group, ALBUMS_PER_PAGE, market)
            .await
        {
            Ok(mut found) => albums.append(&mut found),
            Err(e) => warning!("Error getting {} releases: {}", group, e),
        }
    }
    albums
}

/// Tracks on `albums` credited to `artist_name`, unique by name and primary artist.
///
/// Appears-on releases carry other artists' tracks, so each track has to list
/// the artist among its credits. An album that fails to load is reported and
/// skipped.
pub async fn collect_artist_tracks<C: Catalog>(
    catalog: &C,
    albums: &[Album],
    artist_name: &str,
) -> Vec<CandidateTrack> {
    let mut seen = HashSet::new();
    let mut collected = Vec::new();

    let pb = progress_bar(albums.len() as u64, "Extracting tracks");
    for album in albums {
        pb.inc(1);
        let tracks = match catalog.album_tracks(&album.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                pb.suspend(|| warning!("Error processing album {}: {}", album.name, e));
                continue;
            }
        };

        for track in &tracks {
            let credited: Vec<&str> = track.artists.iter().map(|a| a.name.as_str()).collect();
            if !utils::credits_artist(&credited, artist_name) {
                continue;
            }

            let candidate = CandidateTrack::from_album_track(track, album);
            if seen.insert(selector::track_key(&candidate)) {
                collected.push(candidate);
            }
        }
    }
    pb.finish_and_clear();

    collected
}

/// Fills in popularity and audio features, in batches of [`MAX_IDS_PER_REQUEST`].
///
/// A failed lookup leaves that batch's fields untouched; tracks that end up
/// without audio features are later skipped by the selector.
pub async fn enrich_tracks<C: Catalog>(catalog: &C, tracks: &mut [CandidateTrack]) {
    let batches = utils::batch_count(tracks.len(), MAX_IDS_PER_REQUEST);
    let pb = progress_bar(batches as u64, "Analyzing track characteristics");

    for (index, batch) in tracks.chunks_mut(MAX_IDS_PER_REQUEST).enumerate() {
        let ids: Vec<String> = batch
            .iter()
            .map(|t| utils::track_id_from_uri(&t.uri).to_string())
            .collect();

        match catalog.tracks(&ids).await {
            Ok(details) => {
                for (track, detail) in batch.iter_mut().zip(details) {
                    if let Some(detail) = detail {
                        track.popularity = detail.popularity;
                    }
                }
            }
            Err(e) => pb.suspend(|| {
                warning!("Error getting track details for batch {}: {}", index + 1, e)
            }),
        }

        match catalog.audio_features(&ids).await {
            Ok(features) => {
                for (track, feature) in batch.iter_mut().zip(features) {
                    if feature.is_some() {
                        track.audio_features = feature;
                    }
                }
            }
            Err(e) => pb.suspend(|| {
                warning!("Error getting audio features for batch {}: {}", index + 1, e)
            }),
        }

        pb.inc(1);
    }
    pb.finish_and_clear();
}
