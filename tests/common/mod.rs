#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use playlist_bridge::{
    catalog::{DestinationCatalog, SourceCatalog},
    error::CatalogError,
    types::{
        BearerCredential, Category, Provider, RawTrack, SearchHit, SourcePage, TransferRequest,
        Visibility,
    },
};
use reqwest::StatusCode;

pub fn raw(title: &str, artists: &[&str]) -> Option<RawTrack> {
    Some(RawTrack {
        title: Some(title.to_string()),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        reference: Some(format!("https://open.spotify.com/track/{}", title.replace(' ', ""))),
    })
}

pub fn song(id: &str) -> SearchHit {
    SearchHit {
        id: id.to_string(),
        title: format!("song {}", id),
        category: Category::Song,
    }
}

pub fn video(id: &str) -> SearchHit {
    SearchHit {
        id: id.to_string(),
        title: format!("video {}", id),
        category: Category::Video,
    }
}

pub fn credential() -> BearerCredential {
    BearerCredential::new("token")
}

pub fn request(playlist: &str) -> TransferRequest {
    TransferRequest {
        source_playlist_id: playlist.to_string(),
        destination_playlist_name: None,
        source_credential: Some(credential()),
        destination_credential: Some(credential()),
    }
}

/// In-memory source playlist served in pages.
pub struct FakeSource {
    pub name: String,
    pub pages: Vec<Vec<Option<RawTrack>>>,
    pub reject_probe: bool,
    pub missing_playlist: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(name: &str, pages: Vec<Vec<Option<RawTrack>>>) -> Self {
        Self {
            name: name.to_string(),
            pages,
            reject_probe: false,
            missing_playlist: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SourceCatalog for FakeSource {
    fn provider(&self) -> Provider {
        Provider::Spotify
    }

    async fn probe(&self, _credential: &BearerCredential) -> Result<(), CatalogError> {
        self.record("probe".into());
        if self.reject_probe {
            return Err(CatalogError::Unauthorized(StatusCode::UNAUTHORIZED));
        }
        Ok(())
    }

    async fn playlist_name(
        &self,
        _credential: &BearerCredential,
        playlist_id: &str,
    ) -> Result<String, CatalogError> {
        self.record(format!("name:{}", playlist_id));
        if self.missing_playlist {
            return Err(CatalogError::NotFound(StatusCode::NOT_FOUND));
        }
        Ok(self.name.clone())
    }

    async fn playlist_page(
        &self,
        _credential: &BearerCredential,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<SourcePage, CatalogError> {
        self.record(format!("page:{}:{}", playlist_id, cursor.unwrap_or("-")));
        let index = match cursor {
            None => 0,
            Some(c) => c
                .trim_start_matches("page-")
                .parse::<usize>()
                .map_err(|e| CatalogError::Malformed(e.to_string()))?,
        };

        let entries = self.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(SourcePage { entries, next })
    }
}

/// Scripted destination catalog recording every call.
#[derive(Default)]
pub struct FakeDestination {
    pub songs: HashMap<String, Vec<SearchHit>>,
    pub videos: HashMap<String, Vec<SearchHit>>,
    pub failing: Vec<String>,
    pub reject_probe: bool,
    pub fail_create: bool,
    pub fail_add: bool,
    /// Every search as `(query, category, limit)`.
    pub searches: Mutex<Vec<(String, Category, usize)>>,
    pub created: Mutex<Vec<(String, String, Visibility)>>,
    pub added: Mutex<Vec<(String, Vec<String>, bool)>>,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn songs(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.songs.insert(query.to_string(), hits);
        self
    }

    pub fn videos(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.videos.insert(query.to_string(), hits);
        self
    }

    /// Every search for `query` fails.
    pub fn failing(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn searches(&self) -> Vec<(String, Category, usize)> {
        self.searches.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<(String, String, Visibility)> {
        self.created.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<(String, Vec<String>, bool)> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl DestinationCatalog for FakeDestination {
    fn provider(&self) -> Provider {
        Provider::YouTubeMusic
    }

    async fn probe(&self, _credential: &BearerCredential) -> Result<(), CatalogError> {
        if self.reject_probe {
            return Err(CatalogError::Unauthorized(StatusCode::UNAUTHORIZED));
        }
        Ok(())
    }

    async fn search(
        &self,
        _credential: &BearerCredential,
        query: &str,
        category: Category,
        limit: usize,
    ) -> Result<Vec<SearchHit>, CatalogError> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), category, limit));

        if self.failing.iter().any(|q| q == query) {
            return Err(CatalogError::Malformed("search timed out".into()));
        }

        let table = match category {
            Category::Song => &self.songs,
            _ => &self.videos,
        };
        let mut hits = table.get(query).cloned().unwrap_or_default();
        hits.truncate(limit);
        Ok(hits)
    }

    async fn create_playlist(
        &self,
        _credential: &BearerCredential,
        title: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<String, CatalogError> {
        if self.fail_create {
            return Err(CatalogError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "backend error".into(),
            });
        }
        self.created
            .lock()
            .unwrap()
            .push((title.to_string(), description.to_string(), visibility));
        Ok("PL-new".to_string())
    }

    async fn add_items(
        &self,
        _credential: &BearerCredential,
        playlist_id: &str,
        item_ids: &[String],
        allow_duplicates: bool,
    ) -> Result<(), CatalogError> {
        if self.fail_add {
            return Err(CatalogError::Rejected("STATUS_FAILED".into()));
        }
        self.added.lock().unwrap().push((
            playlist_id.to_string(),
            item_ids.to_vec(),
            allow_duplicates,
        ));
        Ok(())
    }
}
