use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};

use crate::{
    catalog::DestinationCatalog,
    config,
    error::{CatalogError, ConfigError},
    http::{self, Retry},
    types::{BearerCredential, Category, Provider, SearchHit, Visibility},
    utils,
    ytmusic::parse,
};

const ORIGIN: &str = "https://music.youtube.com";
const LIBRARY_PLAYLISTS: &str = "FEmusic_liked_playlists";

// search filter params for "songs" and "videos"
const SONGS_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";
const VIDEOS_PARAMS: &str = "EgWKAQIQAWoMEA4QChADEAQQCRAF";

/// Talks to the YouTube Music web client API with an OAuth bearer token.
pub struct YtMusicClient {
    client: Client,
    api_url: String,
}

impl YtMusicClient {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    pub fn from_config() -> Result<Self, ConfigError> {
        Ok(Self::new(http::build_client()?, config::ytmusic_api_url()))
    }

    async fn post(
        &self,
        credential: &BearerCredential,
        endpoint: &str,
        body: Value,
        retry: Retry,
    ) -> Result<Value, CatalogError> {
        let request = self
            .client
            .post(format!("{}/{}", self.api_url, endpoint))
            .query(&[("alt", "json")])
            .bearer_auth(credential.secret())
            .header("Origin", ORIGIN)
            .header("X-Origin", ORIGIN)
            .json(&with_context(body));

        let response = http::send(request, retry).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

/// Adds the web client context every request body must carry.
fn with_context(mut body: Value) -> Value {
    let version = format!("1.{}.01.00", Utc::now().format("%Y%m%d"));
    body["context"] = json!({
        "client": {
            "clientName": "WEB_REMIX",
            "clientVersion": version,
            "hl": "en",
        },
        "user": {},
    });
    body
}

fn privacy_status(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Private => "PRIVATE",
        Visibility::Unlisted => "UNLISTED",
        Visibility::Public => "PUBLIC",
    }
}

#[async_trait]
impl DestinationCatalog for YtMusicClient {
    fn provider(&self) -> Provider {
        Provider::YouTubeMusic
    }

    async fn probe(&self, credential: &BearerCredential) -> Result<(), CatalogError> {
        self.post(
            credential,
            "browse",
            json!({ "browseId": LIBRARY_PLAYLISTS }),
            Retry::Transient,
        )
        .await
        .map(|_| ())
    }

    async fn search(
        &self,
        credential: &BearerCredential,
        query: &str,
        category: Category,
        limit: usize,
    ) -> Result<Vec<SearchHit>, CatalogError> {
        let mut body = json!({ "query": query });
        match category {
            Category::Song => body["params"] = json!(SONGS_PARAMS),
            Category::Video => body["params"] = json!(VIDEOS_PARAMS),
            Category::Other => {}
        }

        let response = self.post(credential, "search", body, Retry::Never).await?;
        let mut hits = parse::search_hits(&response, category);
        hits.truncate(limit);
        Ok(hits)
    }

    async fn create_playlist(
        &self,
        credential: &BearerCredential,
        title: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<String, CatalogError> {
        let description: String = description.chars().filter(|c| !matches!(c, '<' | '>')).collect();
        let body = json!({
            "title": title,
            "description": description,
            "privacyStatus": privacy_status(visibility),
        });

        let response = self
            .post(credential, "playlist/create", body, Retry::Transient)
            .await?;

        response["playlistId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                CatalogError::Malformed(format!(
                    "no playlistId in create response: {}",
                    utils::truncate(&response.to_string(), 200)
                ))
            })
    }

    async fn add_items(
        &self,
        credential: &BearerCredential,
        playlist_id: &str,
        item_ids: &[String],
        allow_duplicates: bool,
    ) -> Result<(), CatalogError> {
        let actions: Vec<Value> = item_ids
            .iter()
            .map(|id| {
                let mut action = json!({ "action": "ACTION_ADD_VIDEO", "addedVideoId": id });
                if allow_duplicates {
                    // skips the server side duplicate check
                    action["dedupeOption"] = json!("DEDUPE_OPTION_SKIP");
                }
                action
            })
            .collect();

        let body = json!({
            "playlistId": playlist_id.strip_prefix("VL").unwrap_or(playlist_id),
            "actions": actions,
        });

        let response = self
            .post(credential, "browse/edit_playlist", body, Retry::Transient)
            .await?;

        match response["status"].as_str() {
            Some(status) if status.contains("SUCCEEDED") => Ok(()),
            Some(status) => Err(CatalogError::Rejected(status.to_string())),
            None => Err(CatalogError::Rejected(utils::truncate(
                &response.to_string(),
                200,
            ))),
        }
    }
}
