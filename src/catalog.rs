//! Contracts the transfer consumes from the two music services.
//!
//! Credentials are passed into every call; the implementations keep no
//! per-user state, so one client can serve any number of concurrent runs.

use async_trait::async_trait;

use crate::{
    error::CatalogError,
    types::{BearerCredential, Category, Provider, SearchHit, SourcePage, Visibility},
};

/// The catalog a playlist is copied from.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    fn provider(&self) -> Provider;

    /// Cheap authenticated read used to validate the credential.
    async fn probe(&self, credential: &BearerCredential) -> Result<(), CatalogError>;

    async fn playlist_name(
        &self,
        credential: &BearerCredential,
        playlist_id: &str,
    ) -> Result<String, CatalogError>;

    /// Reads one page of playlist entries. `cursor` is the `next` value of the
    /// previous page, or `None` for the first page.
    async fn playlist_page(
        &self,
        credential: &BearerCredential,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<SourcePage, CatalogError>;
}

/// The catalog a playlist is copied to.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    fn provider(&self) -> Provider;

    /// Cheap authenticated read used to validate the credential.
    async fn probe(&self, credential: &BearerCredential) -> Result<(), CatalogError>;

    /// Free-text search restricted to `category`, best results first.
    async fn search(
        &self,
        credential: &BearerCredential,
        query: &str,
        category: Category,
        limit: usize,
    ) -> Result<Vec<SearchHit>, CatalogError>;

    /// Creates an empty playlist and returns its id.
    async fn create_playlist(
        &self,
        credential: &BearerCredential,
        title: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<String, CatalogError>;

    /// Appends `item_ids` in order with a single call.
    async fn add_items(
        &self,
        credential: &BearerCredential,
        playlist_id: &str,
        item_ids: &[String],
        allow_duplicates: bool,
    ) -> Result<(), CatalogError>;
}
