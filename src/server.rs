use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{api, config::Config, types::PkceToken};

/// Routes of the callback server, sharing the PKCE state and config.
pub fn router(config: Arc<Config>, state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config))
}

/// Serves [`router`] on the configured address until the process exits.
pub async fn start_api_server(
    config: Arc<Config>,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    axum::serve(listener, router(config, state)).await
}
