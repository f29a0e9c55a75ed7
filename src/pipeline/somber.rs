use crate::{
    Res, info,
    pipeline::{
        discovery, supplement,
        upload::{self, UploadSummary},
    },
    selector,
    spotify::Catalog,
    success,
    types::CandidateTrack,
    warning,
};

pub const DEFAULT_RESERVE: usize = 20;

#[derive(Debug, Clone)]
pub struct SomberOptions {
    pub artist: String,
    pub count: usize,
    /// Slots held back from the audio-feature selection for keyword finds.
    pub reserve: usize,
    pub market: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SomberOutcome {
    pub tracks: Vec<CandidateTrack>,
    pub releases: usize,
    pub candidates: usize,
    pub from_albums: usize,
    pub supplemented: usize,
    pub playlist_id: Option<String>,
    pub upload: Option<UploadSummary>,
}

/// How many tracks to take from the audio-feature selection.
///
/// The reserve is only honored while it leaves at least one slot.
pub fn selection_limit(count: usize, reserve: usize) -> usize {
    if reserve < count { count - reserve } else { count }
}

pub fn default_name(artist: &str) -> String {
    format!("Dynamic Slow & Somber {}", artist)
}

pub fn default_description(artist: &str, track_count: usize) -> String {
    format!(
        "Automatically curated collection of {} slow and somber {} tracks. Discovered using audio analysis and emotional keywords.",
        track_count, artist
    )
}

/// Builds a slow and somber playlist for one artist.
///
/// Walks the artist's releases, scores every credited track, tops up a short
/// selection with keyword searches and, unless `dry_run` is set, publishes the
/// result as a new playlist.
pub async fn run<C: Catalog>(catalog: &C, opts: &SomberOptions) -> Res<SomberOutcome> {
    let mut outcome = SomberOutcome::default();

    info!("Finding {} on Spotify...", opts.artist);
    let artist = discovery::find_artist(catalog, &opts.artist)
        .await?
        .ok_or_else(|| format!("Could not find {} on Spotify", opts.artist))?;
    success!("Found {}!", artist.name);

    info!("Getting all albums and releases...");
    let albums = discovery::collect_albums(catalog, &artist.id, &opts.market).await;
    outcome.releases = albums.len();
    success!("Found {} releases", albums.len());

    info!("Extracting tracks from albums...");
    let mut candidates = discovery::collect_artist_tracks(catalog, &albums, &opts.artist).await;
    outcome.candidates = candidates.len();
    success!("Found {} total tracks", candidates.len());

    info!("Analyzing track characteristics...");
    discovery::enrich_tracks(catalog, &mut candidates).await;

    info!("Filtering for slow and somber vibes...");
    let limit = selection_limit(opts.count, opts.reserve);
    let mut selected = selector::select_somber_tracks(&candidates, limit);
    outcome.from_albums = selected.len();
    success!(
        "Found {} slow & somber tracks from albums",
        outcome.from_albums
    );

    if selected.len() < opts.count {
        info!(
            "Searching for additional tracks to reach {}...",
            opts.count
        );
        let additional = supplement::search_keyword_tracks(
            catalog,
            &opts.artist,
            &selected,
            opts.count - selected.len(),
        )
        .await;
        outcome.supplemented = additional.len();
        success!("Added {} additional tracks", additional.len());
        selected.extend(additional);
    }

    selected.truncate(opts.count);
    outcome.tracks = selected;

    if outcome.tracks.is_empty() {
        warning!("No tracks found, no playlist created.");
        return Ok(outcome);
    }

    if opts.dry_run {
        info!("Dry run, skipping playlist creation.");
        return Ok(outcome);
    }

    let name = opts
        .name
        .clone()
        .unwrap_or_else(|| default_name(&opts.artist));
    let description = opts
        .description
        .clone()
        .unwrap_or_else(|| default_description(&opts.artist, outcome.tracks.len()));
    let uris: Vec<String> = outcome.tracks.iter().map(|t| t.uri.clone()).collect();

    info!("Creating playlist with {} tracks...", uris.len());
    let (playlist_id, summary) =
        upload::publish_playlist(catalog, &name, &description, opts.public, &uris).await?;
    outcome.playlist_id = Some(playlist_id);
    outcome.upload = Some(summary);

    Ok(outcome)
}
