use somberlist::{
    config::{Config, DEFAULT_AUTH_URL, ENV_AUTH_URL, ENV_CLIENT_ID},
    spotify::auth::authorize_url,
    utils::generate_code_challenge,
};

#[test]
fn test_authorize_url_carries_pkce_parameters() {
    let config = Config::from_lookup(|key| (key == ENV_CLIENT_ID).then(|| "abc".to_string())).unwrap();
    let challenge = generate_code_challenge("verifier");
    let url = authorize_url(&config, &challenge).unwrap();

    assert!(url.starts_with(&format!("{}?", DEFAULT_AUTH_URL)));
    assert!(url.contains("client_id=abc"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains(&format!("code_challenge={}", challenge)));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8000%2Fcallback"));
    assert!(url.contains("scope=playlist-modify-public+playlist-modify-private"));
}

#[test]
fn test_authorize_url_rejects_bad_base() {
    let config = Config::from_lookup(|key| match key {
        ENV_CLIENT_ID => Some("abc".to_string()),
        ENV_AUTH_URL => Some("not a url".to_string()),
        _ => None,
    })
    .unwrap();
    assert!(authorize_url(&config, "challenge").is_err());
}
