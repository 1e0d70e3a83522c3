use playlist_bridge::spotify::playlist::into_source_page;
use playlist_bridge::types::{BearerCredential, PlaylistItemsPage, Token, TokenResponse};
use playlist_bridge::utils::*;

// Helper function to create a test token
fn create_test_token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-read-private".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_code_challenge_known_value() {
    // RFC 7636 appendix B
    assert_eq!(
        generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_token_encoding() {
    let token = create_test_token(1_700_000_000, 3600);

    let encoded = encode_token(&token).unwrap();

    // Must survive a query string untouched
    assert!(!encoded.contains('+'));
    assert!(!encoded.contains('/'));

    let decoded = decode_token(&encoded).unwrap();
    assert_eq!(decoded.access_token, "access");
    assert_eq!(decoded.refresh_token, "refresh");
    assert_eq!(decoded.obtained_at, 1_700_000_000);

    assert!(decode_token("not base64 at all!").is_err());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly", 7), "exactly");
    assert_eq!(truncate("a longer message", 8), "a longer...");
    // Multi-byte characters are not split
    assert_eq!(truncate("äöüß", 2), "äö...");
}

#[test]
fn test_token_expiry() {
    let token = create_test_token(1000, 3600);

    assert!(!token.expires_within(1000, 240));
    assert!(!token.expires_within(4359, 0));
    assert!(token.expires_within(4360, 240));
    assert!(token.expires_within(4600, 0));
}

#[test]
fn test_token_from_refresh_response_keeps_refresh_token() {
    let response = TokenResponse {
        access_token: "new-access".to_string(),
        refresh_token: None,
        scope: None,
        expires_in: None,
    };

    let token = Token::from_response(response, Some("old-refresh"));

    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.refresh_token, "old-refresh");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
    assert_eq!(token.credential().secret(), "new-access");
}

#[test]
fn test_bearer_credential_forms() {
    let bare: BearerCredential = serde_json::from_str(r#""abc""#).unwrap();
    assert_eq!(bare.secret(), "abc");

    let object: BearerCredential =
        serde_json::from_str(r#"{"access_token": "abc", "refresh_token": "r"}"#).unwrap();
    assert_eq!(object, bare);

    assert!(BearerCredential::new("  ").is_blank());

    // Never printed
    assert_eq!(format!("{:?}", bare), "BearerCredential(***)");
}

#[test]
fn test_spotify_page_conversion() {
    let page: PlaylistItemsPage = serde_json::from_str(
        r#"{
            "items": [
                {"track": {
                    "name": "Blue Monday",
                    "artists": [{"name": "New Order"}, {"name": null}, {"name": ""}],
                    "external_urls": {"spotify": "https://open.spotify.com/track/1"}
                }},
                {"track": null},
                {"track": {"name": null, "artists": []}}
            ],
            "next": "https://api.spotify.com/v1/playlists/abc/tracks?offset=100"
        }"#,
    )
    .unwrap();

    let source_page = into_source_page(page);

    assert_eq!(source_page.entries.len(), 3);
    let first = source_page.entries[0].as_ref().unwrap();
    assert_eq!(first.title.as_deref(), Some("Blue Monday"));
    assert_eq!(first.artists, vec!["New Order".to_string()]);
    assert_eq!(
        first.reference.as_deref(),
        Some("https://open.spotify.com/track/1")
    );
    assert!(source_page.entries[1].is_none());
    assert_eq!(source_page.entries[2].as_ref().unwrap().title, None);
    assert!(source_page.next.is_some());
}
