use reqwest::Url;

use crate::{
    config,
    error::{ConfigError, OAuthError},
    oauth,
    types::Token,
};

/// Builds the Google authorization URL for YouTube Music access.
///
/// Requests offline access so that Google issues a refresh token, and keeps
/// previously granted scopes.
pub fn authorize_url(state: &str, code_challenge: &str) -> Result<String, ConfigError> {
    let client_id = config::ytmusic_client_id()?;
    let url = Url::parse_with_params(
        &config::google_auth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::ytmusic_redirect_uri().as_str()),
            ("scope", config::ytmusic_scope().as_str()),
            ("access_type", "offline"),
            ("include_granted_scopes", "true"),
            ("prompt", "consent"),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
        ],
    )
    .map_err(|e| ConfigError::Invalid {
        key: "GOOGLE_AUTH_URL",
        message: e.to_string(),
    })?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for a token.
///
/// Google web clients authenticate with the client secret in addition to the
/// PKCE verifier.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, OAuthError> {
    let client_id = config::ytmusic_client_id()?;
    let client_secret = config::ytmusic_client_secret()?;
    let redirect_uri = config::ytmusic_redirect_uri();

    let response = oauth::request_token(
        &config::google_token_url(),
        &[
            ("grant_type", "authorization_code"),
            ("client_id", &client_id),
            ("client_secret", &client_secret),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &redirect_uri),
        ],
    )
    .await?;

    Ok(Token::from_response(response, None))
}

/// Refreshes an expired access token. Google does not rotate refresh tokens,
/// so the one passed in is kept.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, OAuthError> {
    let client_id = config::ytmusic_client_id()?;
    let client_secret = config::ytmusic_client_secret()?;

    let response = oauth::request_token(
        &config::google_token_url(),
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &client_id),
            ("client_secret", &client_secret),
        ],
    )
    .await?;

    Ok(Token::from_response(response, Some(refresh_token)))
}
