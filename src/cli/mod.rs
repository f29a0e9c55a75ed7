//! # CLI Module
//!
//! User-facing commands. Each one takes the resolved
//! [`Config`](crate::config::Config), drives the pipeline, and reports
//! progress with the crate's status macros.
//!
//! - [`auth`] - Runs the OAuth PKCE flow and caches the token
//! - [`somber`] - Discovers an artist's slow and somber tracks and builds a playlist
//! - [`curated`] - Resolves a fixed list of titles and builds a playlist
//!
//! ```bash
//! somberlist auth
//! somberlist somber --artist "Juice WRLD" --count 100
//! somberlist curated --artist Dave --titles-file dave.txt
//! ```
//!
//! Commands return errors for failures that end the run; `main` turns them
//! into a message and a remediation checklist.

mod auth;
mod curated;
mod somber;

pub use auth::auth;
pub use curated::{CuratedArgs, curated};
pub use somber::{SomberArgs, somber};
