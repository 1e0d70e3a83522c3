use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use reqwest::Url;

use crate::{
    api::authorize::LOGIN_TTL_SECS,
    config, oauth,
    server::AppState,
    types::{LoginHandoff, Provider, Token},
    utils, warning,
};

pub async fn spotify_callback(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Response {
    complete_login(Provider::Spotify, params, state).await
}

pub async fn ytmusic_callback(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Response {
    complete_login(Provider::YouTubeMusic, params, state).await
}

async fn complete_login(
    provider: Provider,
    params: HashMap<String, String>,
    state: AppState,
) -> Response {
    let Some(state_key) = params.get("state") else {
        return failure(provider, false, "Missing OAuth state.");
    };

    let now = Utc::now().timestamp() as u64;
    let pending = state.auth.lock().await.get(state_key).cloned();
    let Some(pending) = pending
        .filter(|p| p.provider == provider && !p.is_expired(now, LOGIN_TTL_SECS))
    else {
        return failure(provider, false, "Unknown or expired login.");
    };
    let to_frontend = pending.handoff == LoginHandoff::Frontend;

    if let Some(err) = params.get("error") {
        state.auth.lock().await.remove(state_key);
        warning!("{} login refused: {}", provider, err);
        return failure(provider, to_frontend, err);
    }

    let Some(code) = params.get("code") else {
        state.auth.lock().await.remove(state_key);
        return failure(provider, to_frontend, "No code received");
    };

    let exchanged = oauth::exchange_code(provider, code, &pending.code_verifier).await;

    let mut logins = state.auth.lock().await;
    match (exchanged, pending.handoff) {
        (Ok(token), LoginHandoff::Waiter) => {
            if let Some(entry) = logins.get_mut(state_key) {
                entry.token = Some(token);
            }
            success_page(provider)
        }
        (Ok(token), LoginHandoff::Frontend) => {
            logins.remove(state_key);
            frontend_success(provider, &token)
        }
        (Ok(_), LoginHandoff::Page) => {
            logins.remove(state_key);
            success_page(provider)
        }
        (Err(e), _) => {
            logins.remove(state_key);
            warning!("{} token exchange failed: {}", provider, e);
            failure(provider, to_frontend, &e.to_string())
        }
    }
}

fn success_page(provider: Provider) -> Response {
    Html(format!(
        "<h2>{} authentication successful.</h2><p>Close browser window.</p>",
        provider
    ))
    .into_response()
}

/// Sends the browser back to the frontend with the URL-safe base64 token.
fn frontend_success(provider: Provider, token: &Token) -> Response {
    let encoded = match utils::encode_token(token) {
        Ok(encoded) => encoded,
        Err(e) => return failure(provider, true, &e.to_string()),
    };

    let flag = format!("{}_auth", provider.slug());
    match frontend_url(&[(flag.as_str(), "success"), ("token", encoded.as_str())]) {
        Some(url) => Redirect::to(url.as_str()).into_response(),
        None => Html("<h2>Authentication successful.</h2>").into_response(),
    }
}

fn failure(provider: Provider, to_frontend: bool, message: &str) -> Response {
    if to_frontend {
        let error = format!("{}_auth_failed", provider.slug());
        if let Some(url) = frontend_url(&[("error", error.as_str()), ("message", message)]) {
            return Redirect::to(url.as_str()).into_response();
        }
    }

    (
        StatusCode::BAD_REQUEST,
        Html(format!(
            "<h4>{} login failed.</h4><p>{}</p>",
            provider,
            escape_html(message)
        )),
    )
        .into_response()
}

fn frontend_url(params: &[(&str, &str)]) -> Option<Url> {
    let base = config::frontend_url()?;
    Url::parse_with_params(&format!("{}/", base), params).ok()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
