use somberlist::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");

    let other = generate_code_challenge("different_verifier");
    assert_ne!(challenge, other);
    assert!(
        other
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_track_id_from_uri() {
    assert_eq!(track_id_from_uri("spotify:track:4iV5W9uYEdYUVa79Axb7Rh"), "4iV5W9uYEdYUVa79Axb7Rh");
    assert_eq!(track_id_from_uri("plainid"), "plainid");
}

#[test]
fn test_playlist_url() {
    assert_eq!(playlist_url("abc123"), "https://open.spotify.com/playlist/abc123");
}

#[test]
fn test_parse_target_count() {
    assert_eq!(parse_target_count("50"), 50);
    assert_eq!(parse_target_count("  250\n"), 250);
    assert_eq!(parse_target_count(""), DEFAULT_TARGET_COUNT);
    assert_eq!(parse_target_count("\n"), DEFAULT_TARGET_COUNT);
    assert_eq!(parse_target_count("lots"), DEFAULT_TARGET_COUNT);
    assert_eq!(parse_target_count("-5"), DEFAULT_TARGET_COUNT);
    assert_eq!(parse_target_count("0"), DEFAULT_TARGET_COUNT);
}

#[test]
fn test_artist_matches() {
    assert!(artist_matches("Juice WRLD", "Juice WRLD"));
    assert!(artist_matches("JUICE WRLD", "juice wrld"));
    assert!(artist_matches("Juice WRLD & Marshmello", "Juice WRLD"));
    assert!(!artist_matches("Juice", "Juice WRLD"));
    assert!(!artist_matches("Dave East", "Central Cee"));
    assert!(!artist_matches("Anyone", ""));
    assert!(!artist_matches("Anyone", "   "));
}

#[test]
fn test_credits_artist() {
    assert!(credits_artist(&["Marshmello", "Juice WRLD"], "Juice WRLD"));
    assert!(!credits_artist(&["Marshmello"], "Juice WRLD"));

    let owned = vec!["Dave".to_string()];
    assert!(credits_artist(&owned, "dave"));

    let none: [&str; 0] = [];
    assert!(!credits_artist(&none, "Dave"));
}

#[test]
fn test_batch_count() {
    assert_eq!(batch_count(0, 100), 0);
    assert_eq!(batch_count(100, 100), 1);
    assert_eq!(batch_count(250, 100), 3);
    assert_eq!(batch_count(120, 50), 3);
    assert_eq!(batch_count(10, 0), 0);
}
