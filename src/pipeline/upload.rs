use crate::{
    spotify::{Catalog, CatalogError, MAX_URIS_PER_REQUEST},
    success, warning,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UploadSummary {
    pub batches: usize,
    pub added: usize,
    pub failed_batches: usize,
}

/// Appends `uris` to the playlist in batches of [`MAX_URIS_PER_REQUEST`].
///
/// A failed batch is reported and counted; the remaining batches still go out.
pub async fn add_tracks_in_batches<C: Catalog>(
    catalog: &C,
    playlist_id: &str,
    uris: &[String],
) -> UploadSummary {
    let mut summary = UploadSummary::default();

    for (index, batch) in uris.chunks(MAX_URIS_PER_REQUEST).enumerate() {
        summary.batches += 1;
        match catalog.add_items(playlist_id, batch).await {
            Ok(_) => {
                summary.added += batch.len();
                success!("Added batch {}: {} tracks", index + 1, batch.len());
            }
            Err(e) => {
                summary.failed_batches += 1;
                warning!("Failed to add batch {}: {}", index + 1, e);
            }
        }
    }

    summary
}

/// Creates a playlist for the current user and fills it with `uris`.
///
/// Resolving the user or creating the playlist failing is returned as an
/// error; upload failures are only reflected in the summary.
pub async fn publish_playlist<C: Catalog>(
    catalog: &C,
    name: &str,
    description: &str,
    public: bool,
    uris: &[String],
) -> Result<(String, UploadSummary), CatalogError> {
    let user = catalog.current_user().await?;
    let playlist = catalog
        .create_playlist(&user.id, name, public, description)
        .await?;
    success!("Created playlist: {}", playlist.name);

    let summary = add_tracks_in_batches(catalog, &playlist.id, uris).await;
    Ok((playlist.id, summary))
}
