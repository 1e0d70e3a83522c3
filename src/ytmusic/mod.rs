//! # YouTube Music Integration Module
//!
//! YouTube Music is the destination catalog: the bridge searches it and
//! creates the new playlist there.
//!
//! - [`auth`] - Google OAuth 2.0 authorization-code flow (PKCE plus client
//!   secret) for the `youtube` scope.
//! - [`client`] - [`YtMusicClient`](client::YtMusicClient), the
//!   [`DestinationCatalog`](crate::catalog::DestinationCatalog) implementation
//!   on top of the `youtubei/v1` web client endpoints.
//! - [`parse`] - search response extraction.
//!
//! Searches are sent once and never retried; playlist creation and item
//! insertion retry rate limits and gateway errors like the Spotify reads.

pub mod auth;
pub mod client;
pub mod parse;
