use std::sync::Arc;

use somberlist::{
    api::{AuthProgress, HealthReport},
    config::{Config, ENV_CLIENT_ID},
    server::router,
    types::{PkceToken, Token},
};
use tokio::sync::Mutex;

type SharedState = Arc<Mutex<Option<PkceToken>>>;

async fn spawn_server() -> (String, SharedState) {
    let config = Config::from_lookup(|key| (key == ENV_CLIENT_ID).then(|| "abc".to_string())).unwrap();
    let state: SharedState = Arc::new(Mutex::new(None));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = router(Arc::new(config), Arc::clone(&state));
    tokio::spawn(async move { axum::serve(listener, app).await });

    (base, state)
}

async fn health(base: &str) -> HealthReport {
    reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_follows_auth_progress() {
    let (base, state) = spawn_server().await;

    let report = health(&base).await;
    assert_eq!(report.name, "somberlist");
    assert_eq!(report.auth, AuthProgress::Idle);

    *state.lock().await = Some(PkceToken {
        code_verifier: "verifier".to_string(),
        token: None,
    });
    assert_eq!(health(&base).await.auth, AuthProgress::AwaitingCallback);

    if let Some(pkce) = state.lock().await.as_mut() {
        pkce.token = Some(Token {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            scope: String::new(),
            expires_in: 3600,
            obtained_at: 0,
        });
    }
    assert_eq!(health(&base).await.auth, AuthProgress::Authorized);
}

#[tokio::test]
async fn test_callback_reports_denied_and_missing_code() {
    let (base, state) = spawn_server().await;

    let denied = reqwest::get(format!("{}/callback?error=access_denied", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(denied.contains("Authorization denied"));

    let missing = reqwest::get(format!("{}/callback", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(missing.contains("Missing authorization code"));
    assert!(state.lock().await.is_none());
}
