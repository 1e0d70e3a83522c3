//! # CLI Module
//!
//! User-facing command implementations. Each command loads what it needs,
//! delegates to the library and reports with the console macros; fatal
//! problems end the process through [`error!`](crate::error!).
//!
//! ## Commands
//!
//! - [`auth`] - browser login for Spotify or YouTube Music, token cached in
//!   the local data directory
//! - [`transfer`] - copy a Spotify playlist to a new private YouTube Music
//!   playlist using the cached tokens (refreshed when close to expiry)
//! - [`serve`] - run the HTTP API with OAuth routes and `POST /transfer`
//!
//! ## Usage
//!
//! ```bash
//! playlist-bridge auth spotify
//! playlist-bridge auth ytmusic
//! playlist-bridge transfer https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! playlist-bridge transfer spotify:playlist:37i9dQZF1DXcBWIGoYBM5M --name "Hits"
//! playlist-bridge serve
//! ```

mod auth;
mod serve;
mod transfer;

pub use auth::auth;
pub use serve::serve;
pub use transfer::transfer;
