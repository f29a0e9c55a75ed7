use std::{sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config::Config,
    management::TokenManager,
    spotify::{Catalog, CatalogError, rate_limit::RateLimiter},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, Album, Artist, AudioFeatures,
        AudioFeaturesResponse, CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser,
        FullTrack, Page, SearchResponse, SeveralTracksResponse, Track,
    },
    warning,
};

/// Longest server-requested pause that is honored before giving up.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const DEFAULT_MIN_INTERVAL_MS: u64 = 100;

/// Spotify Web API client.
///
/// Every request goes through the rate limiter and carries a bearer token that
/// is refreshed on demand. `429` and `502` responses are retried up to
/// `max_attempts` times in total.
pub struct SpotifyClient {
    http: Client,
    config: Arc<Config>,
    tokens: Mutex<TokenManager>,
    limiter: Mutex<RateLimiter>,
    max_attempts: u32,
    bad_gateway_delay: Duration,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            config,
            tokens: Mutex::new(tokens),
            limiter: Mutex::new(RateLimiter::from_millis(DEFAULT_MIN_INTERVAL_MS)),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            bad_gateway_delay: DEFAULT_BAD_GATEWAY_DELAY,
        }
    }

    /// Client using the token cached by `somberlist auth`.
    pub async fn connect(config: Arc<Config>) -> Result<Self, String> {
        let tokens = TokenManager::load().await.map_err(|e| {
            format!(
                "Failed to load token. Please run {} auth\n Error: {}",
                env!("CARGO_PKG_NAME"),
                e
            )
        })?;
        Ok(Self::new(config, tokens))
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Mutex::new(limiter);
        self
    }

    pub fn with_retries(mut self, max_attempts: u32, bad_gateway_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.bad_gateway_delay = bad_gateway_delay;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    async fn send<F>(&self, build: F) -> Result<Response, CatalogError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let last_attempt = attempt >= self.max_attempts;

            self.limiter.lock().await.wait_if_needed().await;

            let token = self
                .tokens
                .lock()
                .await
                .get_valid_token(&self.config)
                .await
                .map_err(CatalogError::Auth)?;

            let response = build(&self.http).bearer_auth(token).send().await?;
            let status = response.status();

            if status.is_success() {
                self.limiter.lock().await.report_success();
                return Ok(response);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                self.limiter.lock().await.report_failure();
                let retry_after = retry_after_secs(&response);
                if retry_after > MAX_RETRY_AFTER_SECS {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                    return Err(CatalogError::RateLimited(retry_after));
                }
                if last_attempt {
                    return Err(CatalogError::RateLimited(retry_after));
                }
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            if status == StatusCode::BAD_GATEWAY && !last_attempt {
                self.limiter.lock().await.report_failure();
                sleep(self.bad_gateway_delay).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status(status, body));
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self.send(|http| http.get(url).query(query)).await?;
        Ok(response.json::<T>().await?)
    }

    /// Follows `next` links until the last page.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let mut page: Page<T> = self.get_json(url, query).await?;
        let mut items = std::mem::take(&mut page.items);

        while let Some(next) = page.next.take() {
            page = self.get_json(&next, &[]).await?;
            items.append(&mut page.items);
        }

        Ok(items)
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

impl Catalog for SpotifyClient {
    async fn search_artist(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
        let query = format!("artist:{}", name);
        let res: SearchResponse = self
            .get_json(
                &self.url("/search"),
                &[("q", query.as_str()), ("type", "artist"), ("limit", "1")],
            )
            .await?;

        Ok(res.artists.and_then(|page| page.items.into_iter().next()))
    }

    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<FullTrack>, CatalogError> {
        let limit = limit.to_string();
        let res: SearchResponse = self
            .get_json(
                &self.url("/search"),
                &[("q", query), ("type", "track"), ("limit", limit.as_str())],
            )
            .await?;

        Ok(res.tracks.map(|page| page.items).unwrap_or_default())
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        album_type: &str,
        limit: u32,
        country: &str,
    ) -> Result<Vec<Album>, CatalogError> {
        let limit = limit.to_string();
        self.get_all_pages(
            &self.url(&format!("/artists/{}/albums", artist_id)),
            &[
                ("include_groups", album_type),
                ("limit", limit.as_str()),
                ("market", country),
            ],
        )
        .await
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>, CatalogError> {
        self.get_all_pages(
            &self.url(&format!("/albums/{}/tracks", album_id)),
            &[("limit", "50")],
        )
        .await
    }

    async fn tracks(&self, ids: &[String]) -> Result<Vec<Option<FullTrack>>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.join(",");
        let res: SeveralTracksResponse = self
            .get_json(&self.url("/tracks"), &[("ids", ids.as_str())])
            .await?;
        Ok(res.tracks)
    }

    async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.join(",");
        let res: AudioFeaturesResponse = self
            .get_json(&self.url("/audio-features"), &[("ids", ids.as_str())])
            .await?;
        Ok(res.audio_features)
    }

    async fn current_user(&self) -> Result<CurrentUser, CatalogError> {
        self.get_json(&self.url("/me"), &[]).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        let url = self.url(&format!("/users/{}/playlists", user_id));
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
            collaborative: false,
        };

        let response = self.send(|http| http.post(&url).json(&body)).await?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<String, CatalogError> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self.send(|http| http.post(&url).json(&body)).await?;
        let res = response.json::<AddTrackToPlaylistResponse>().await?;
        Ok(res.snapshot_id)
    }
}
