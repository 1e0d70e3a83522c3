use crate::{
    config, error, info,
    server::{AppState, start_api_server},
};

pub async fn serve() {
    let state = match AppState::from_config() {
        Ok(state) => state,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if let Some(frontend) = config::frontend_url() {
        info!("Logins started from the browser return to {}", frontend);
    }

    if let Err(e) = start_api_server(state).await {
        error!("Server stopped: {}", e);
    }
}
