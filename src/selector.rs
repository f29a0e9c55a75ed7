//! Somber-track selection.
//!
//! Scores candidate tracks by how sad, calm, slow and undanceable they are,
//! keeps the ones that clear every threshold, and ranks them by a blend of
//! score and popularity.
//!
//! ```text
//! somber_score = 0.4*(1 - valence) + 0.3*(1 - energy)
//!              + 0.2*(140 - min(tempo, 140))/140 + 0.1*(1 - danceability)
//! ```

use std::collections::HashSet;

use crate::types::{AudioFeatures, CandidateTrack};

/// Tempo at and above which a track is never considered slow.
pub const TEMPO_CEILING: f64 = 140.0;
pub const MAX_VALENCE: f64 = 0.6;
pub const MAX_ENERGY: f64 = 0.7;
pub const MAX_DANCEABILITY: f64 = 0.7;
pub const MIN_SOMBER_SCORE: f64 = 0.3;

/// Score given to keyword-search supplements, which are never measured.
pub const SUPPLEMENT_SCORE: f64 = 0.5;

// Weights in tenths; summing integers first keeps the bounds exact (0.0 and 1.0).
const VALENCE_WEIGHT: f64 = 4.0;
const ENERGY_WEIGHT: f64 = 3.0;
const TEMPO_WEIGHT: f64 = 2.0;
const DANCEABILITY_WEIGHT: f64 = 1.0;
const WEIGHT_SCALE: f64 = 10.0;

const SCORE_RANK_WEIGHT: f64 = 0.7;
const POPULARITY_RANK_WEIGHT: f64 = 0.3;

/// Composite somber heuristic in `[0, 1]` for in-range features.
pub fn somber_score(features: &AudioFeatures) -> f64 {
    let slowness = (TEMPO_CEILING - features.tempo.min(TEMPO_CEILING)) / TEMPO_CEILING;

    (VALENCE_WEIGHT * (1.0 - features.valence)
        + ENERGY_WEIGHT * (1.0 - features.energy)
        + TEMPO_WEIGHT * slowness
        + DANCEABILITY_WEIGHT * (1.0 - features.danceability))
        / WEIGHT_SCALE
}

/// Inclusion predicate. Every condition must hold.
pub fn is_somber(features: &AudioFeatures, score: f64) -> bool {
    features.tempo < TEMPO_CEILING
        && features.valence < MAX_VALENCE
        && features.energy < MAX_ENERGY
        && features.danceability < MAX_DANCEABILITY
        && score > MIN_SOMBER_SCORE
}

/// Sort key for selected tracks, higher first.
pub fn ranking_key(somber_score: f64, popularity: u32) -> f64 {
    SCORE_RANK_WEIGHT * somber_score + POPULARITY_RANK_WEIGHT * (popularity as f64 / 100.0)
}

/// Case-insensitive identity of a track: `(name, primary artist)`.
pub fn track_key(track: &CandidateTrack) -> (String, String) {
    (
        track.name.to_lowercase(),
        track.primary_artist().to_lowercase(),
    )
}

/// Drops later entries that share a [`track_key`] with an earlier one.
pub fn dedup_by_key(tracks: &mut Vec<CandidateTrack>) {
    let mut seen = HashSet::new();
    tracks.retain(|t| seen.insert(track_key(t)));
}

/// Picks at most `limit` somber tracks, best first.
///
/// Tracks without audio features are skipped. Duplicates by [`track_key`]
/// collapse to the first one seen. Equal ranking keys keep encounter order.
pub fn select_somber_tracks(tracks: &[CandidateTrack], limit: usize) -> Vec<CandidateTrack> {
    let mut seen = HashSet::new();
    let mut selected: Vec<(f64, CandidateTrack)> = Vec::new();

    for track in tracks {
        let Some(features) = track.audio_features.as_ref() else {
            continue;
        };
        if !seen.insert(track_key(track)) {
            continue;
        }

        let score = somber_score(features);
        if !is_somber(features, score) {
            continue;
        }

        let mut scored = track.clone();
        scored.somber_score = Some(score);
        selected.push((ranking_key(score, track.popularity), scored));
    }

    // sort_by is stable, so ties stay in encounter order
    selected.sort_by(|a, b| b.0.total_cmp(&a.0));
    selected.truncate(limit);
    selected.into_iter().map(|(_, t)| t).collect()
}
