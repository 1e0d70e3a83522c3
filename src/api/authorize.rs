use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::{
    config,
    error::ConfigError,
    oauth,
    server::{AppState, AuthState},
    types::{LoginHandoff, PendingAuth, Provider},
    utils, warning,
};

/// Seconds a started login waits for its callback.
pub const LOGIN_TTL_SECS: u64 = 120;

/// Logins kept in flight at once; the oldest is dropped beyond this.
pub const MAX_PENDING_LOGINS: usize = 32;

/// A started login: where to send the browser and the state to wait on.
pub struct Login {
    pub url: String,
    pub state: String,
}

/// Registers a pending login and builds its authorization URL.
///
/// The PKCE verifier stays in `auth` until the callback for `state` arrives
/// or [`LOGIN_TTL_SECS`] have passed. Expired logins are dropped here.
pub async fn begin_login(
    auth: &AuthState,
    provider: Provider,
    handoff: LoginHandoff,
) -> Result<Login, ConfigError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let url = oauth::authorize_url(provider, &state, &code_challenge)?;

    let mut pending = auth.lock().await;
    let now = Utc::now().timestamp() as u64;
    pending.retain(|_, login| !login.is_expired(now, LOGIN_TTL_SECS));

    while pending.len() >= MAX_PENDING_LOGINS {
        let Some(oldest) = pending
            .iter()
            .min_by_key(|(_, login)| login.created_at)
            .map(|(key, _)| key.clone())
        else {
            break;
        };
        pending.remove(&oldest);
    }

    pending.insert(
        state.clone(),
        PendingAuth::new(provider, code_verifier, handoff),
    );

    Ok(Login { url, state })
}

async fn authorize(state: AppState, provider: Provider) -> Response {
    let handoff = match config::frontend_url() {
        Some(_) => LoginHandoff::Frontend,
        None => LoginHandoff::Page,
    };
    match begin_login(&state.auth, provider, handoff).await {
        Ok(login) => Redirect::to(&login.url).into_response(),
        Err(e) => {
            warning!("Cannot start {} login: {}", provider, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn spotify_authorize(State(state): State<AppState>) -> Response {
    authorize(state, Provider::Spotify).await
}

pub async fn ytmusic_authorize(State(state): State<AppState>) -> Response {
    authorize(state, Provider::YouTubeMusic).await
}
