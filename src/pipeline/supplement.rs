use std::collections::HashSet;

use crate::{
    selector::{self, SUPPLEMENT_SCORE},
    spotify::Catalog,
    types::CandidateTrack,
    utils, warning,
};

/// Words that tend to show up in the titles of sad songs.
pub const SAD_KEYWORDS: [&str; 19] = [
    "sad",
    "cry",
    "pain",
    "hurt",
    "broken",
    "empty",
    "alone",
    "depression",
    "anxiety",
    "lost",
    "lonely",
    "tears",
    "goodbye",
    "miss",
    "love",
    "heartbreak",
    "sorry",
    "regret",
    "dark",
];

/// Only the first keywords are searched to keep the request count down.
pub const MAX_KEYWORD_SEARCHES: usize = 10;
pub const RESULTS_PER_KEYWORD: u32 = 10;

pub fn keyword_query(artist_name: &str, keyword: &str) -> String {
    format!("artist:\"{}\" {}", artist_name, keyword)
}

/// Finds up to `limit` more tracks by the artist through keyword searches.
///
/// A hit is skipped when its URI or its (name, primary artist) key matches a
/// track in `selected` or one found earlier, and when it does not credit the
/// artist. Every hit gets [`SUPPLEMENT_SCORE`] without being measured. A failed
/// search is reported and skipped.
pub async fn search_keyword_tracks<C: Catalog>(
    catalog: &C,
    artist_name: &str,
    selected: &[CandidateTrack],
    limit: usize,
) -> Vec<CandidateTrack> {
    let mut found = Vec::new();
    let mut seen_uris: HashSet<String> = selected.iter().map(|t| t.uri.clone()).collect();
    let mut seen_keys: HashSet<(String, String)> =
        selected.iter().map(selector::track_key).collect();

    for keyword in SAD_KEYWORDS.iter().take(MAX_KEYWORD_SEARCHES) {
        if found.len() >= limit {
            break;
        }

        let query = keyword_query(artist_name, keyword);
        let results = match catalog.search_tracks(&query, RESULTS_PER_KEYWORD).await {
            Ok(results) => results,
            Err(e) => {
                warning!("Error searching with keyword '{}': {}", keyword, e);
                continue;
            }
        };

        for track in &results {
            let credited: Vec<&str> = track.artists.iter().map(|a| a.name.as_str()).collect();
            if !utils::credits_artist(&credited, artist_name) {
                continue;
            }
            if seen_uris.contains(&track.uri) {
                continue;
            }

            let mut candidate = CandidateTrack::from_full_track(track);
            if !seen_keys.insert(selector::track_key(&candidate)) {
                continue;
            }
            seen_uris.insert(track.uri.clone());
            candidate.somber_score = Some(SUPPLEMENT_SCORE);
            found.push(candidate);
        }
    }

    found.truncate(limit);
    found
}
