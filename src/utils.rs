use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Playlist size used when the prompt answer is blank or not a number.
pub const DEFAULT_TARGET_COUNT: usize = 100;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Last `:`-separated segment of a catalog URI (`spotify:track:<id>` -> `<id>`).
pub fn track_id_from_uri(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", playlist_id)
}

/// Parses the answer to the playlist size prompt.
///
/// Blank, non-numeric and zero answers fall back to [`DEFAULT_TARGET_COUNT`].
pub fn parse_target_count(input: &str) -> usize {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_TARGET_COUNT,
    }
}

/// Whether a credited artist name refers to the target artist.
///
/// Case-insensitive; every whitespace-separated token of `target` has to occur
/// in `credited`, so "Juice WRLD" matches "Juice WRLD" and "JUICE WRLD & Co".
pub fn artist_matches(credited: &str, target: &str) -> bool {
    let credited = credited.to_lowercase();
    let mut tokens = target.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|token| credited.contains(&token.to_lowercase()))
}

/// Whether any of `artists` refers to the target artist.
pub fn credits_artist<S: AsRef<str>>(artists: &[S], target: &str) -> bool {
    artists.iter().any(|a| artist_matches(a.as_ref(), target))
}

/// Number of batches `len` items split into with batches of `size`.
pub fn batch_count(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}
