//! Configuration management for playlist-bridge.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults for public endpoints and local addresses
//!
//! OAuth client credentials have no default and are reported as
//! [`ConfigError::Missing`] when absent.

use std::{env, path::PathBuf, time::Duration};

use crate::{Res, error::ConfigError};

pub const APP_DIR: &str = "playlist-bridge";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8888/spotify/callback";
const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-read-private playlist-read-collaborative";
const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

const DEFAULT_YTM_REDIRECT_URI: &str = "http://127.0.0.1:8888/ytmusic/callback";
const DEFAULT_YTM_SCOPE: &str = "https://www.googleapis.com/auth/youtube";
const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_YTMUSIC_API_URL: &str = "https://music.youtube.com/youtubei/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `playlist-bridge/.env` in the platform data directory
/// (`~/.local/share` on Linux). A missing file is fine: deployments may set
/// everything through the process environment. Variables already present in
/// the environment are not overridden.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns the application's directory inside the local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the HTTP server binds to, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Web frontend that receives encoded tokens after a browser-initiated login.
///
/// When unset, OAuth callbacks answer with a small HTML page instead.
pub fn frontend_url() -> Option<String> {
    env::var("FRONTEND_URL")
        .ok()
        .map(|v| v.trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

/// Upper bound for a single external call (search, read, create, add).
pub fn request_timeout() -> Result<Duration, ConfigError> {
    match env::var("REQUEST_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                message: e.to_string(),
            }),
        Err(_) => Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
    }
}

pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Must match the redirect URI registered with the Spotify application.
pub fn spotify_redirect_uri() -> String {
    or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI)
}

pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

pub fn spotify_auth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

pub fn spotify_token_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Base URL of the Spotify Web API, without trailing slash.
pub fn spotify_api_url() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
        .trim_end_matches('/')
        .to_string()
}

pub fn ytmusic_client_id() -> Result<String, ConfigError> {
    required("YTM_CLIENT_ID")
}

/// Google web clients still require the secret alongside PKCE.
pub fn ytmusic_client_secret() -> Result<String, ConfigError> {
    required("YTM_CLIENT_SECRET")
}

pub fn ytmusic_redirect_uri() -> String {
    or_default("YTM_REDIRECT_URI", DEFAULT_YTM_REDIRECT_URI)
}

pub fn ytmusic_scope() -> String {
    or_default("YTM_SCOPE", DEFAULT_YTM_SCOPE)
}

pub fn google_auth_url() -> String {
    or_default("GOOGLE_AUTH_URL", DEFAULT_GOOGLE_AUTH_URL)
}

pub fn google_token_url() -> String {
    or_default("GOOGLE_TOKEN_URL", DEFAULT_GOOGLE_TOKEN_URL)
}

/// Base URL of the YouTube Music internal API, without trailing slash.
pub fn ytmusic_api_url() -> String {
    or_default("YTMUSIC_API_URL", DEFAULT_YTMUSIC_API_URL)
        .trim_end_matches('/')
        .to_string()
}
