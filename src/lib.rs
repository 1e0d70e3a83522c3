//! Spotify to YouTube Music playlist bridge.
//!
//! This library copies the contents of one Spotify playlist into a newly
//! created YouTube Music playlist. Every source track is matched on the
//! destination catalog through free-text search and the run reports which
//! tracks made it across and which did not.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for OAuth callbacks, health and transfer requests
//! - `catalog` - Traits describing the source and destination catalogs
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared across the crate
//! - `http` - Shared HTTP client, status mapping and retry handling
//! - `management` - Local token cache used by the CLI
//! - `oauth` - Provider independent OAuth dispatch
//! - `server` - HTTP server and router
//! - `spotify` - Spotify authentication and playlist reader
//! - `transfer` - Playlist identifier normalization, track matching and the transfer run
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE and token encoding helpers
//! - `ytmusic` - YouTube Music authentication and catalog client
//!
//! # Example
//!
//! ```
//! use playlist_bridge::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> playlist_bridge::Res<()> {
//!     config::load_env().await?;
//!     cli::serve().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod management;
pub mod oauth;
pub mod server;
pub mod spotify;
pub mod transfer;
pub mod types;
pub mod utils;
pub mod ytmusic;

/// A convenient Result type alias for CLI glue that may fail in many ways.
///
/// Library operations return the typed errors from [`error`]; this alias is
/// used where those are collected for display only.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Reading playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Matched {} of {} tracks", matched, total);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable CLI conditions. Library and server code return
/// errors instead.
///
/// # Example
///
/// ```
/// error!("No cached Spotify token. Run playlist-bridge auth spotify");
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Search failed for '{}': {}", query, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
