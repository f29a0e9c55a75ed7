use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use tabled::Table;

use crate::{
    Res,
    config::Config,
    info,
    pipeline::somber::{self, SomberOptions},
    spotify::SpotifyClient,
    success,
    types::{CandidateTrack, TrackTableRow},
    utils, warning,
};

/// Number of tracks shown in the closing report.
const SAMPLE_SIZE: usize = 10;

pub struct SomberArgs {
    pub artist: String,
    pub count: Option<usize>,
    pub reserve: usize,
    pub market: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub private: bool,
    pub dry_run: bool,
}

pub async fn somber(config: Arc<Config>, args: SomberArgs) -> Res<()> {
    let client = SpotifyClient::connect(Arc::clone(&config)).await?;

    let count = match args.count {
        Some(n) if n > 0 => n,
        _ => prompt_target_count(),
    };

    let opts = SomberOptions {
        market: args.market.unwrap_or_else(|| config.market.clone()),
        artist: args.artist,
        count,
        reserve: args.reserve,
        name: args.name,
        description: args.description,
        public: !args.private,
        dry_run: args.dry_run,
    };

    let outcome = somber::run(&client, &opts).await?;

    if let Some(summary) = &outcome.upload {
        if summary.failed_batches > 0 {
            warning!(
                "{} of {} batches failed to upload",
                summary.failed_batches,
                summary.batches
            );
        }
        success!(
            "Successfully created playlist with {} tracks!",
            summary.added
        );
    }
    if let Some(playlist_id) = &outcome.playlist_id {
        info!("Playlist URL: {}", utils::playlist_url(playlist_id));
    }

    print_sample(&outcome.tracks);
    Ok(())
}

/// Asks for the playlist size on stdin; blank or invalid answers mean 100.
fn prompt_target_count() -> usize {
    print!(
        "How many tracks do you want in the playlist? (default: {}): ",
        utils::DEFAULT_TARGET_COUNT
    );
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => utils::parse_target_count(&line),
        Err(_) => utils::DEFAULT_TARGET_COUNT,
    }
}

fn print_sample(tracks: &[CandidateTrack]) {
    if tracks.is_empty() {
        return;
    }

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .take(SAMPLE_SIZE)
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            album: t.album.clone(),
            score: format!("{:.2}", t.somber_score.unwrap_or_default()),
        })
        .collect();

    println!("Sample tracks:\n{}", Table::new(rows));
    if tracks.len() > SAMPLE_SIZE {
        println!("  ... and {} more tracks", tracks.len() - SAMPLE_SIZE);
    }
}
