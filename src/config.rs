//! Configuration management for Somberlist.
//!
//! This module loads configuration from environment variables and an optional
//! `.env` file and resolves it into a [`Config`] value once at startup. The
//! resolved `Config` is passed explicitly to the Spotify client, the OAuth flow
//! and the callback server. Nothing reads credentials from globals.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client ID)

use std::{env, fmt, net::SocketAddr, path::PathBuf, str::FromStr};

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const ENV_SCOPE: &str = "SPOTIFY_API_AUTH_SCOPE";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_MARKET: &str = "SOMBERLIST_MARKET";

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8000/callback";
pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_MARKET: &str = "US";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidServerAddress(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::InvalidServerAddress(addr) => {
                write!(f, "{} is not a valid socket address: {}", ENV_SERVER_ADDRESS, addr)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide settings for talking to Spotify.
///
/// `client_secret` is optional: without it the authorization code exchange
/// relies on PKCE alone.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub server_addr: SocketAddr,
    pub market: String,
}

impl Config {
    /// Resolves the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let client_id = get(ENV_CLIENT_ID).ok_or(ConfigError::Missing(ENV_CLIENT_ID))?;

        let server_addr_raw = or_default(ENV_SERVER_ADDRESS, DEFAULT_SERVER_ADDRESS);
        let server_addr = SocketAddr::from_str(&server_addr_raw)
            .map_err(|_| ConfigError::InvalidServerAddress(server_addr_raw.clone()))?;

        Ok(Self {
            client_id,
            client_secret: get(ENV_CLIENT_SECRET),
            redirect_uri: or_default(ENV_REDIRECT_URI, DEFAULT_REDIRECT_URI),
            scope: or_default(ENV_SCOPE, DEFAULT_SCOPE),
            api_url: or_default(ENV_API_URL, DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_url: or_default(ENV_AUTH_URL, DEFAULT_AUTH_URL),
            token_url: or_default(ENV_TOKEN_URL, DEFAULT_TOKEN_URL),
            server_addr,
            market: or_default(ENV_MARKET, DEFAULT_MARKET),
        })
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist. A missing `.env` file
/// is not an error: the plain process environment is used instead.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/somberlist/.env`
/// - macOS: `~/Library/Application Support/somberlist/.env`
/// - Windows: `%LOCALAPPDATA%/somberlist/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or if an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Location of the user's `.env` file.
pub fn env_path() -> PathBuf {
    data_dir().join(".env")
}

/// Root of everything Somberlist stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("somberlist");
    path
}
