use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config, oauth,
    types::{Provider, Token},
};

/// Refresh this many seconds before the provider's expiry.
const EXPIRY_LEEWAY_SECS: u64 = 240;

/// On-disk token cache for one provider, used by the CLI.
///
/// Tokens live in `<data dir>/playlist-bridge/cache/<provider>_token.json`.
/// The transfer itself never refreshes credentials; the CLI calls
/// [`TokenManager::get_valid_token`] before handing a token over.
pub struct TokenManager {
    provider: Provider,
    token: Token,
}

impl TokenManager {
    pub fn new(provider: Provider, token: Token) -> Self {
        TokenManager { provider, token }
    }

    pub async fn load(provider: Provider) -> Result<Self, String> {
        let path = Self::token_path(provider);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { provider, token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(self.provider);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns a usable access token, refreshing and re-persisting it first
    /// when it is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<Token, String> {
        if self.is_expired() {
            if self.token.refresh_token.is_empty() {
                return Err(format!(
                    "{} token expired and cannot be refreshed",
                    self.provider
                ));
            }

            let new_token = oauth::refresh(self.provider, &self.token.refresh_token)
                .await
                .map_err(|e| e.to_string())?;
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        self.token.expires_within(now, EXPIRY_LEEWAY_SECS)
    }

    pub fn token_path(provider: Provider) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/{}_token.json", provider.slug()));
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
