use std::sync::Arc;

use axum::{Extension, response::Json};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::types::PkceToken;

/// Where the authorization flow served by this process stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProgress {
    Idle,
    AwaitingCallback,
    Authorized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub name: String,
    pub version: String,
    pub auth: AuthProgress,
}

pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Json<HealthReport> {
    let auth = match shared_state.lock().await.as_ref() {
        None => AuthProgress::Idle,
        Some(pkce) if pkce.token.is_some() => AuthProgress::Authorized,
        Some(_) => AuthProgress::AwaitingCallback,
    };

    Json(HealthReport {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        auth,
    })
}
