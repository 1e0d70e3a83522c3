use std::time::{Duration, Instant};

use crate::{
    api, error,
    management::TokenManager,
    server::{AppState, AuthState, start_api_server},
    success,
    types::{LoginHandoff, Provider, Token},
    warning,
};

const MAX_WAIT: Duration = Duration::from_secs(api::LOGIN_TTL_SECS);

/// Runs the browser login for `provider` and caches the resulting token.
///
/// Starts the local callback server, opens the authorization URL in the
/// default browser and waits for the callback to deliver a token.
pub async fn auth(provider: Provider) {
    let state = match AppState::from_config() {
        Ok(state) => state,
        Err(e) => error!("Cannot start callback server: {}", e),
    };

    let login = match api::begin_login(&state.auth, provider, LoginHandoff::Waiter).await {
        Ok(login) => login,
        Err(e) => error!("Cannot start {} login: {}", provider, e),
    };

    let auth_state = state.auth.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&login.url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login.url
        )
    }

    match wait_for_token(auth_state, &login.state).await {
        Some(token) => {
            let token_manager = TokenManager::new(provider, token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("{} authentication successful!", provider);
        }
        None => {
            error!("{} authentication failed or timed out.", provider);
        }
    }
}

/// Polls the pending login until the callback stored a token or the wait
/// budget is used up.
async fn wait_for_token(auth_state: AuthState, state: &str) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < MAX_WAIT {
        {
            let lock = auth_state.lock().await;
            match lock.get(state) {
                Some(pending) => {
                    if let Some(token) = &pending.token {
                        return Some(token.clone());
                    }
                }
                // the callback drops the entry when the login failed
                None => return None,
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
