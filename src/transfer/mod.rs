//! # Transfer Module
//!
//! Copies one source playlist into a new destination playlist.
//!
//! - [`normalize`] - turns a playlist URL, URI or bare id into the id
//! - [`resolver`] - matches one source track on the destination catalog
//! - [`orchestrator`] - the transfer run: validation, reading, matching,
//!   playlist creation and the outcome report
//!
//! Tracks are resolved one after the other in source order, so the outcome
//! lists unmatched tracks in the order they appear in the source playlist.

pub mod normalize;
pub mod orchestrator;
pub mod resolver;

pub use normalize::normalize_playlist_id;
pub use orchestrator::{Transfer, UNMATCHED_DISPLAY_LIMIT};
pub use resolver::resolve;
