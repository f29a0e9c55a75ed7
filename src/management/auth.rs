use std::path::PathBuf;

use chrono::Utc;

use crate::{config::Config, spotify, types::Token};

/// Seconds before expiry at which the access token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
    path: Option<PathBuf>,
}

impl TokenManager {
    /// Manager backed by the on-disk token cache.
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Some(Self::token_path()),
        }
    }

    /// Manager that never touches the disk.
    pub fn in_memory(token: Token) -> Self {
        TokenManager { token, path: None }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            token,
            path: Some(path),
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing it first if it is about to expire.
    pub async fn get_valid_token(&mut self, config: &Config) -> Result<String, String> {
        if self.is_expired() {
            let mut new_token =
                spotify::auth::refresh_token(config, &self.token.refresh_token).await?;
            // Spotify may omit the refresh token when it does not rotate it
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        crate::config::data_dir().join("cache/token.json")
    }
}
