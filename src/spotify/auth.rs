use reqwest::Url;

use crate::{
    config,
    error::{ConfigError, OAuthError},
    oauth,
    types::Token,
};

/// Builds the Spotify authorization URL for a PKCE login.
///
/// The user is sent here to grant the playlist read scopes. Spotify redirects
/// back to the configured redirect URI with `code` and the echoed `state`.
///
/// # Errors
///
/// Fails when the client id is not configured or the auth URL is invalid.
pub fn authorize_url(state: &str, code_challenge: &str) -> Result<String, ConfigError> {
    let client_id = config::spotify_client_id()?;
    let url = Url::parse_with_params(
        &config::spotify_auth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config::spotify_scope().as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| ConfigError::Invalid {
        key: "SPOTIFY_API_AUTH_URL",
        message: e.to_string(),
    })?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for a token using the PKCE verifier.
///
/// The verifier must be the one whose challenge went out with the
/// authorization request. Codes are single use.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, OAuthError> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let response = oauth::request_token(
        &config::spotify_token_url(),
        &[
            ("grant_type", "authorization_code"),
            ("client_id", &client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &redirect_uri),
        ],
    )
    .await?;

    Ok(Token::from_response(response, None))
}

/// Refreshes an expired access token.
///
/// Spotify may rotate the refresh token; when it does not send a new one the
/// old one stays valid and is kept.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, OAuthError> {
    let client_id = config::spotify_client_id()?;

    let response = oauth::request_token(
        &config::spotify_token_url(),
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &client_id),
        ],
    )
    .await?;

    Ok(Token::from_response(response, Some(refresh_token)))
}
