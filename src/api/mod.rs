//! # API Module
//!
//! HTTP endpoints served by the local callback server during `somberlist auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify and exchanges
//!   it, together with the PKCE verifier, for an access token.
//! - [`health`] - Reports name, version and how far the authorization got.
//!
//! Both handlers read the shared PKCE state from an `Extension` layer; see
//! [`crate::server::router`].

mod callback;
mod health;

pub use callback::callback;
pub use health::{AuthProgress, HealthReport, health};
