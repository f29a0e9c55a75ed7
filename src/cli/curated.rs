use std::{path::PathBuf, sync::Arc};

use tabled::Table;

use crate::{
    Res,
    config::Config,
    info,
    pipeline::{curated, upload},
    spotify::SpotifyClient,
    success,
    types::MissingTitleRow,
    utils, warning,
};

pub struct CuratedArgs {
    pub artist: String,
    pub titles: Vec<String>,
    pub titles_file: Option<PathBuf>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub private: bool,
    pub dry_run: bool,
}

pub fn default_name(artist: &str) -> String {
    format!("Sombre & Melancholic {}", artist)
}

pub fn default_description(artist: &str) -> String {
    format!(
        "A collection of {}'s most reflective, moody, and emotional tracks.",
        artist
    )
}

pub async fn curated(config: Arc<Config>, args: CuratedArgs) -> Res<()> {
    let mut titles = args.titles;
    if let Some(path) = &args.titles_file {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        titles.extend(curated::parse_titles(&content));
    }
    if titles.is_empty() {
        return Err("No track titles given. Pass titles or --titles-file.".into());
    }

    let client = SpotifyClient::connect(config).await?;

    info!("Searching for {} tracks...", titles.len());
    let resolution = curated::resolve_titles(&client, &args.artist, &titles).await;

    info!(
        "Results: {} found, {} not found, {} duplicates dropped",
        resolution.found.len(),
        resolution.missing.len(),
        resolution.duplicates
    );
    if !resolution.missing.is_empty() {
        let rows: Vec<MissingTitleRow> = resolution
            .missing
            .iter()
            .map(|t| MissingTitleRow { title: t.clone() })
            .collect();
        println!("Not found:\n{}", Table::new(rows));
    }

    if resolution.found.is_empty() {
        warning!("No tracks found.");
        return Ok(());
    }

    if args.dry_run {
        info!("Dry run, skipping playlist creation.");
        return Ok(());
    }

    let name = args.name.unwrap_or_else(|| default_name(&args.artist));
    let description = args
        .description
        .unwrap_or_else(|| default_description(&args.artist));

    let (playlist_id, summary) = upload::publish_playlist(
        &client,
        &name,
        &description,
        !args.private,
        &resolution.uris(),
    )
    .await?;

    success!("Added {} tracks to {}", summary.added, name);
    info!("Playlist URL: {}", utils::playlist_url(&playlist_id));
    Ok(())
}
