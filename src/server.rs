use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::{
    Res, api,
    catalog::{DestinationCatalog, SourceCatalog},
    config,
    error::ConfigError,
    info,
    spotify::playlist::SpotifyClient,
    types::PendingAuth,
    ytmusic::client::YtMusicClient,
};

/// Logins in flight, keyed by their OAuth `state` value.
pub type AuthState = Arc<Mutex<HashMap<String, PendingAuth>>>;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub source: Arc<dyn SourceCatalog>,
    pub destination: Arc<dyn DestinationCatalog>,
}

impl AppState {
    pub fn new(source: Arc<dyn SourceCatalog>, destination: Arc<dyn DestinationCatalog>) -> Self {
        Self {
            auth: Arc::new(Mutex::new(HashMap::new())),
            source,
            destination,
        }
    }

    /// State wired to the real Spotify and YouTube Music clients.
    pub fn from_config() -> Result<Self, ConfigError> {
        Ok(Self::new(
            Arc::new(SpotifyClient::from_config()?),
            Arc::new(YtMusicClient::from_config()?),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/spotify/authorize", get(api::spotify_authorize))
        .route("/spotify/callback", get(api::spotify_callback))
        .route("/ytmusic/authorize", get(api::ytmusic_authorize))
        .route("/ytmusic/callback", get(api::ytmusic_callback))
        .route("/transfer", post(api::transfer))
        .with_state(state)
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
