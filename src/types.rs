use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// The two music services the bridge talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[value(name = "spotify")]
    Spotify,
    #[value(name = "ytmusic")]
    #[serde(rename = "ytmusic")]
    YouTubeMusic,
}

impl Provider {
    /// Short identifier used in URLs, cache file names and query parameters.
    pub fn slug(&self) -> &'static str {
        match self {
            Provider::Spotify => "spotify",
            Provider::YouTubeMusic => "ytmusic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Spotify => f.write_str("Spotify"),
            Provider::YouTubeMusic => f.write_str("YouTube Music"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Builds a token from a token-endpoint response.
    ///
    /// Refresh responses may omit the refresh token; `previous_refresh` is
    /// kept in that case.
    pub fn from_response(response: TokenResponse, previous_refresh: Option<&str>) -> Self {
        let refresh_token = response
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default();

        Token {
            access_token: response.access_token,
            refresh_token,
            scope: response.scope.unwrap_or_default(),
            expires_in: response.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }

    /// True once the token is within `leeway_secs` of its expiry.
    pub fn expires_within(&self, now: u64, leeway_secs: u64) -> bool {
        now + leeway_secs >= self.obtained_at + self.expires_in
    }

    pub fn credential(&self) -> BearerCredential {
        BearerCredential::new(self.access_token.clone())
    }
}

/// Body returned by both the Spotify and the Google token endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// Error body of an OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// Where the token of a completed login goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginHandoff {
    /// Redirect the browser to the configured frontend with the encoded token.
    Frontend,
    /// Keep the token in the pending login until the CLI collects it.
    Waiter,
    /// Answer with a confirmation page and forget the login.
    Page,
}

/// An OAuth login that has been started but not yet called back.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub provider: Provider,
    pub code_verifier: String,
    pub handoff: LoginHandoff,
    /// Unix seconds when the login was started.
    pub created_at: u64,
    pub token: Option<Token>,
}

impl PendingAuth {
    pub fn new(provider: Provider, code_verifier: String, handoff: LoginHandoff) -> Self {
        PendingAuth {
            provider,
            code_verifier,
            handoff,
            created_at: Utc::now().timestamp() as u64,
            token: None,
        }
    }

    pub fn is_expired(&self, now: u64, ttl_secs: u64) -> bool {
        now >= self.created_at + ttl_secs
    }
}

/// Opaque bearer token handed to the catalogs.
///
/// Deserializes from either a bare access-token string or a token object
/// carrying an `access_token` field.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CredentialInput")]
pub struct BearerCredential(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum CredentialInput {
    Bare(String),
    Token { access_token: String },
}

impl From<CredentialInput> for BearerCredential {
    fn from(input: CredentialInput) -> Self {
        match input {
            CredentialInput::Bare(token) => BearerCredential(token),
            CredentialInput::Token { access_token } => BearerCredential(access_token),
        }
    }
}

impl BearerCredential {
    pub fn new(token: impl Into<String>) -> Self {
        BearerCredential(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredential(***)")
    }
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

// Catalog-neutral records

/// One entry of a source playlist as the catalog reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrack {
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub reference: Option<String>,
}

/// One page of a source playlist. `None` entries are items without a
/// playable track (deleted or unavailable).
#[derive(Debug, Clone, Default)]
pub struct SourcePage {
    pub entries: Vec<Option<RawTrack>>,
    /// Opaque cursor for the next page; `None` on the last page.
    pub next: Option<String>,
}

/// Category of a destination search request or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Song,
    Video,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Private,
    Unlisted,
    Public,
}

// Transfer domain

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDescriptor {
    pub title: String,
    /// Display names of all credited artists, joined with ", ".
    pub artist: String,
    pub source_reference: Option<String>,
}

impl TrackDescriptor {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        TrackDescriptor {
            title: title.into(),
            artist: artist.into(),
            source_reference: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTier {
    ExactSong,
    FallbackFirstResult,
    FallbackVideo,
    None,
}

/// How a single source track was resolved on the destination catalog.
///
/// Built only through [`MatchResult::found`] and [`MatchResult::not_found`],
/// so a destination item id is present exactly when the tier is not `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    track: TrackDescriptor,
    destination_item_id: Option<String>,
    tier: MatchTier,
}

impl MatchResult {
    pub fn found(track: TrackDescriptor, item_id: String, tier: MatchTier) -> Self {
        debug_assert!(tier != MatchTier::None);
        MatchResult {
            track,
            destination_item_id: Some(item_id),
            tier,
        }
    }

    pub fn not_found(track: TrackDescriptor) -> Self {
        MatchResult {
            track,
            destination_item_id: None,
            tier: MatchTier::None,
        }
    }

    pub fn track(&self) -> &TrackDescriptor {
        &self.track
    }

    pub fn destination_item_id(&self) -> Option<&str> {
        self.destination_item_id.as_deref()
    }

    pub fn tier(&self) -> MatchTier {
        self.tier
    }

    pub fn matched(&self) -> bool {
        self.destination_item_id.is_some()
    }

    pub fn into_track(self) -> TrackDescriptor {
        self.track
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Success,
    Partial,
    Failed,
}

/// States of one transfer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferPhase {
    Validating,
    ReadingSource,
    Resolving,
    CreatingDestination,
    Complete,
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransferPhase::Validating => "validating",
            TransferPhase::ReadingSource => "reading source",
            TransferPhase::Resolving => "resolving",
            TransferPhase::CreatingDestination => "creating destination",
            TransferPhase::Complete => "complete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    EmptySource,
    NoMatches,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferFailure {
    pub phase: TransferPhase,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub source_playlist_name: String,
    pub destination_playlist_name: Option<String>,
    pub total_source_tracks: usize,
    pub matched_count: usize,
    /// Number of unmatched tracks before the display cap.
    pub unmatched_count: usize,
    /// The first unmatched tracks in source order.
    pub unmatched_tracks: Vec<TrackDescriptor>,
    pub destination_playlist_id: Option<String>,
    pub status: TransferStatus,
    pub failure: Option<TransferFailure>,
}

/// Body of `POST /transfer`.
///
/// The snake_case names sent by the web frontend are accepted as
/// aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(default, alias = "playlist_identifier")]
    pub source_playlist_id: String,
    #[serde(default, alias = "yt_playlist_name")]
    pub destination_playlist_name: Option<String>,
    #[serde(default, alias = "spotify_token")]
    pub source_credential: Option<BearerCredential>,
    #[serde(default, alias = "ytmusic_token")]
    pub destination_credential: Option<BearerCredential>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artist: String,
    pub link: String,
}

impl From<&TrackDescriptor> for TrackTableRow {
    fn from(track: &TrackDescriptor) -> Self {
        TrackTableRow {
            title: track.title.clone(),
            artist: track.artist.clone(),
            link: track.source_reference.clone().unwrap_or_default(),
        }
    }
}
