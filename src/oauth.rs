//! Provider independent OAuth entry points.
//!
//! Both providers use the authorization-code flow with PKCE. These functions
//! pick the provider specific endpoint and parameters so that the callback
//! server, the CLI and the token cache do not have to.

use reqwest::Client;

use crate::{
    error::{ConfigError, OAuthError},
    spotify,
    types::{Provider, Token, TokenErrorResponse, TokenResponse},
    utils, ytmusic,
};

pub fn authorize_url(
    provider: Provider,
    state: &str,
    code_challenge: &str,
) -> Result<String, ConfigError> {
    match provider {
        Provider::Spotify => spotify::auth::authorize_url(state, code_challenge),
        Provider::YouTubeMusic => ytmusic::auth::authorize_url(state, code_challenge),
    }
}

pub async fn exchange_code(
    provider: Provider,
    code: &str,
    verifier: &str,
) -> Result<Token, OAuthError> {
    match provider {
        Provider::Spotify => spotify::auth::exchange_code_pkce(code, verifier).await,
        Provider::YouTubeMusic => ytmusic::auth::exchange_code_pkce(code, verifier).await,
    }
}

pub async fn refresh(provider: Provider, refresh_token: &str) -> Result<Token, OAuthError> {
    match provider {
        Provider::Spotify => spotify::auth::refresh_token(refresh_token).await,
        Provider::YouTubeMusic => ytmusic::auth::refresh_token(refresh_token).await,
    }
}

/// Posts a form to a token endpoint and decodes the token or the error body.
pub async fn request_token(url: &str, form: &[(&str, &str)]) -> Result<TokenResponse, OAuthError> {
    let response = Client::new().post(url).form(form).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => match err.error_description {
                Some(description) => format!("{}: {}", err.error, description),
                None => err.error,
            },
            Err(_) => format!("{}: {}", status, utils::truncate(&body, 200)),
        };
        return Err(OAuthError::Rejected(reason));
    }

    serde_json::from_str::<TokenResponse>(&body)
        .map_err(|e| OAuthError::Rejected(format!("unexpected token response: {}", e)))
}
