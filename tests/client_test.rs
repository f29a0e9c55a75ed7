use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use somberlist::{
    config::{Config, ENV_API_URL, ENV_CLIENT_ID},
    management::TokenManager,
    spotify::{Catalog, CatalogError, SpotifyClient, rate_limit::RateLimiter},
    types::Token,
};

#[derive(Clone, Default)]
struct FakeApi {
    base: String,
    me_calls: Arc<AtomicUsize>,
    search_calls: Arc<AtomicUsize>,
    feature_calls: Arc<AtomicUsize>,
    auth_headers: Arc<Mutex<Vec<String>>>,
    added: Arc<Mutex<Vec<usize>>>,
}

fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "id": "juice", "name": "Juice WRLD" }]
    })
}

async fn album_tracks(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    match query.get("offset").map(String::as_str) {
        Some("2") => Json(json!({ "items": [track_json("t3")], "next": null, "total": 3 })),
        _ => Json(json!({
            "items": [track_json("t1"), track_json("t2")],
            "next": format!("{}/albums/{}/tracks?offset=2", api.base, id),
            "total": 3
        })),
    }
}

async fn me(State(api): State<FakeApi>) -> Response {
    if api.me_calls.fetch_add(1, Ordering::SeqCst) == 0 {
        return (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "0")]).into_response();
    }
    Json(json!({ "id": "listener", "display_name": "Listener" })).into_response()
}

async fn search(State(api): State<FakeApi>) -> Response {
    api.search_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "500")]).into_response()
}

async fn audio_features(State(api): State<FakeApi>) -> StatusCode {
    api.feature_calls.fetch_add(1, Ordering::SeqCst);
    StatusCode::BAD_GATEWAY
}

async fn tracks() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "no such track")
}

async fn add_items(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        api.auth_headers.lock().unwrap().push(auth.to_string());
    }
    let count = body["uris"].as_array().map(Vec::len).unwrap_or_default();
    api.added.lock().unwrap().push(count);
    Json(json!({ "snapshot_id": "snap1" }))
}

async fn spawn_api() -> (SpotifyClient, FakeApi) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/v1", listener.local_addr().unwrap());

    let api = FakeApi {
        base: base.clone(),
        ..Default::default()
    };
    let app = Router::new()
        .route("/v1/albums/{id}/tracks", get(album_tracks))
        .route("/v1/me", get(me))
        .route("/v1/search", get(search))
        .route("/v1/audio-features", get(audio_features))
        .route("/v1/tracks", get(tracks))
        .route("/v1/playlists/{id}/tracks", post(add_items))
        .with_state(api.clone());
    tokio::spawn(async move { axum::serve(listener, app).await });

    let config = Config::from_lookup(|key| match key {
        ENV_CLIENT_ID => Some("client".to_string()),
        ENV_API_URL => Some(base.clone()),
        _ => None,
    })
    .unwrap();
    let token = Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    };

    let client = SpotifyClient::new(Arc::new(config), TokenManager::in_memory(token))
        .with_rate_limiter(RateLimiter::from_millis(0))
        .with_retries(2, Duration::from_millis(10));
    (client, api)
}

#[tokio::test]
async fn test_album_tracks_follows_next_pages() {
    let (client, _api) = spawn_api().await;
    let tracks = client.album_tracks("a1").await.unwrap();
    let ids: Vec<Option<&str>> = tracks.iter().map(|t| t.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("t1"), Some("t2"), Some("t3")]);
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let (client, api) = spawn_api().await;
    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, "listener");
    assert_eq!(api.me_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_excessive_retry_after_gives_up() {
    let (client, api) = spawn_api().await;
    let err = client.search_tracks("sad", 10).await.unwrap_err();
    assert!(matches!(err, CatalogError::RateLimited(500)));
    assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bad_gateway_is_retried_then_reported() {
    let (client, api) = spawn_api().await;
    let err = client
        .audio_features(&["t1".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Status(status, _) if status == StatusCode::BAD_GATEWAY));
    assert_eq!(api.feature_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_other_status_is_returned_with_body() {
    let (client, _api) = spawn_api().await;
    let err = client.tracks(&["nope".to_string()]).await.unwrap_err();
    match err {
        CatalogError::Status(status, body) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "no such track");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_add_items_sends_bearer_token() {
    let (client, api) = spawn_api().await;
    let uris: Vec<String> = (0..3).map(|i| format!("spotify:track:{}", i)).collect();
    let snapshot = client.add_items("pl", &uris).await.unwrap();

    assert_eq!(snapshot, "snap1");
    assert_eq!(*api.added.lock().unwrap(), vec![3]);
    assert_eq!(*api.auth_headers.lock().unwrap(), vec!["Bearer access".to_string()]);
}

#[tokio::test]
async fn test_empty_batches_skip_the_network() {
    let (client, api) = spawn_api().await;
    assert!(client.audio_features(&[]).await.unwrap().is_empty());
    assert_eq!(api.feature_calls.load(Ordering::SeqCst), 0);
}
