use async_trait::async_trait;
use reqwest::Client;

use crate::{
    catalog::SourceCatalog,
    config,
    error::{CatalogError, ConfigError},
    http::{self, Retry},
    types::{
        BearerCredential, CurrentUser, PlaylistItemsPage, PlaylistSummary, Provider, RawTrack,
        SourcePage, SpotifyTrack,
    },
};

const PAGE_LIMIT: &str = "100";
const ITEM_FIELDS: &str = "items(track(name,artists(name),external_urls)),next";

/// Reads playlists from the Spotify Web API.
pub struct SpotifyClient {
    client: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Client against the configured API URL with the configured timeout.
    pub fn from_config() -> Result<Self, ConfigError> {
        Ok(Self::new(http::build_client()?, config::spotify_api_url()))
    }

    /// Returns the profile of the user owning the credential.
    pub async fn current_user(
        &self,
        credential: &BearerCredential,
    ) -> Result<CurrentUser, CatalogError> {
        let request = self
            .client
            .get(format!("{}/me", self.api_url))
            .bearer_auth(credential.secret());
        let response = http::send(request, Retry::Transient).await?;
        Ok(response.json::<CurrentUser>().await?)
    }
}

#[async_trait]
impl SourceCatalog for SpotifyClient {
    fn provider(&self) -> Provider {
        Provider::Spotify
    }

    async fn probe(&self, credential: &BearerCredential) -> Result<(), CatalogError> {
        self.current_user(credential).await.map(|_| ())
    }

    async fn playlist_name(
        &self,
        credential: &BearerCredential,
        playlist_id: &str,
    ) -> Result<String, CatalogError> {
        let request = self
            .client
            .get(format!("{}/playlists/{}", self.api_url, playlist_id))
            .query(&[("fields", "name")])
            .bearer_auth(credential.secret());
        let response = http::send(request, Retry::Transient).await?;
        let summary = response.json::<PlaylistSummary>().await?;

        Ok(summary
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown Playlist".to_string()))
    }

    async fn playlist_page(
        &self,
        credential: &BearerCredential,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<SourcePage, CatalogError> {
        // `next` links already carry offset, limit and fields
        let request = match cursor {
            Some(next) => self.client.get(next),
            None => self
                .client
                .get(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
                .query(&[
                    ("limit", PAGE_LIMIT),
                    ("fields", ITEM_FIELDS),
                ]),
        };

        let response = http::send(request.bearer_auth(credential.secret()), Retry::Transient).await?;
        let page = response.json::<PlaylistItemsPage>().await?;
        Ok(into_source_page(page))
    }
}

/// Converts a Spotify items page into catalog-neutral entries.
pub fn into_source_page(page: PlaylistItemsPage) -> SourcePage {
    SourcePage {
        entries: page
            .items
            .into_iter()
            .map(|item| item.track.map(into_raw_track))
            .collect(),
        next: page.next,
    }
}

fn into_raw_track(track: SpotifyTrack) -> RawTrack {
    RawTrack {
        title: track.name,
        artists: track
            .artists
            .into_iter()
            .filter_map(|a| a.name)
            .filter(|n| !n.is_empty())
            .collect(),
        reference: track.external_urls.and_then(|u| u.spotify),
    }
}
