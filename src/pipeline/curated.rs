use std::collections::HashSet;

use crate::{spotify::Catalog, success, warning};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTitle {
    pub title: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Resolution {
    pub found: Vec<ResolvedTitle>,
    pub missing: Vec<String>,
    /// Titles that resolved to a URI already in `found`.
    pub duplicates: usize,
}

impl Resolution {
    pub fn uris(&self) -> Vec<String> {
        self.found.iter().map(|r| r.uri.clone()).collect()
    }
}

pub fn title_query(title: &str, artist_name: &str) -> String {
    format!("track:{} artist:{}", title, artist_name)
}

/// Looks up each title by the artist and keeps the first match.
///
/// A failed search counts as not found. Titles that resolve to an already
/// found track are dropped.
pub async fn resolve_titles<C: Catalog>(
    catalog: &C,
    artist_name: &str,
    titles: &[String],
) -> Resolution {
    let mut resolution = Resolution::default();
    let mut seen = HashSet::new();

    for title in titles {
        let query = title_query(title, artist_name);
        let hit = match catalog.search_tracks(&query, 1).await {
            Ok(results) => results.into_iter().next(),
            Err(e) => {
                warning!("Error searching for {}: {}", title, e);
                None
            }
        };

        let Some(track) = hit else {
            warning!("Not found: {}", title);
            resolution.missing.push(title.clone());
            continue;
        };

        success!("Found: {}", track.name);
        if !seen.insert(track.uri.clone()) {
            resolution.duplicates += 1;
            continue;
        }
        resolution.found.push(ResolvedTitle {
            title: title.clone(),
            name: track.name,
            uri: track.uri,
        });
    }

    resolution
}

/// Parses a titles file: one title per line, blank lines and `#` comments ignored.
pub fn parse_titles(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
