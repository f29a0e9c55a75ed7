//! Somberlist Library
//!
//! This library builds mood-driven playlists on Spotify. It walks an artist's
//! catalog, scores every track by how slow, sad and low-energy it sounds, and
//! writes the best matches back as a playlist. A second builder resolves a fixed
//! list of titles into a playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command implementations (`auth`, `somber`, `curated`)
//! - `config` - Configuration resolved from the environment and `.env`
//! - `management` - OAuth token caching and refresh
//! - `pipeline` - Discovery, supplementing, resolution and upload steps
//! - `selector` - Somber score, inclusion predicate and ranking
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client and the `Catalog` seam
//! - `types` - Wire types and domain types
//! - `utils` - PKCE helpers, URI helpers and prompt parsing
//!
//! # Example
//!
//! ```
//! use somberlist::config;
//!
//! #[tokio::main]
//! async fn main() -> somberlist::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod pipeline;
pub mod selector;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Orchestration code returns this so that configuration, token and catalog
/// errors can all bubble up to the top-level handler in `main`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Finding {} on Spotify...", artist);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Found {} releases", albums.len());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors. Per-item failures go through [`warning!`] and the
/// pipeline carries on.
///
/// # Example
///
/// ```
/// error!("Failed to parse server address: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures: an album that could not be read, a batch
/// whose details failed, a title that did not resolve.
///
/// # Example
///
/// ```
/// warning!("Error processing album {}: {}", album.name, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
