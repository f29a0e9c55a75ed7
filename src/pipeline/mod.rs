//! # Pipeline Module
//!
//! The steps both playlist builders are assembled from. Every step takes a
//! [`Catalog`](crate::spotify::Catalog) so it runs the same against Spotify and
//! against the in-memory catalogs used in tests.
//!
//! - [`discovery`] - artist lookup, release walk, track collection, detail enrichment
//! - [`supplement`] - keyword search that tops up a short somber selection
//! - [`curated`] - resolving a fixed list of titles to catalog URIs
//! - [`upload`] - playlist creation and batched item upload
//! - [`somber`] - the dynamic somber playlist run, start to finish
//!
//! Per-item failures are logged with `warning!` and the item is dropped. Only
//! failures that make the whole run meaningless are returned as errors.

pub mod curated;
pub mod discovery;
pub mod somber;
pub mod supplement;
pub mod upload;

use indicatif::{ProgressBar, ProgressStyle};

pub(crate) fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb
}
