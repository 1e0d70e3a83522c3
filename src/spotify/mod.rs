//! # Spotify Integration Module
//!
//! Spotify is the source catalog: the bridge only reads from it.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with PKCE: authorization URL,
//!   code exchange and token refresh against `accounts.spotify.com`.
//! - [`playlist`] - [`SpotifyClient`](playlist::SpotifyClient), the
//!   [`SourceCatalog`](crate::catalog::SourceCatalog) implementation.
//!
//! ## API Coverage
//!
//! - `GET /me` - credential probe
//! - `GET /playlists/{id}?fields=name` - playlist name
//! - `GET /playlists/{id}/tracks` - playlist entries, 100 per page, following `next`
//! - `POST /api/token` - code exchange and refresh
//!
//! Reads retry rate limits (`Retry-After`) and gateway errors a bounded number
//! of times, see [`crate::http`].

pub mod auth;
pub mod playlist;
