//! # API Module
//!
//! HTTP endpoints served by [`crate::server`].
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status and version
//! - [`spotify_authorize`], [`ytmusic_authorize`] - start a login and redirect
//!   the browser to the provider
//! - [`spotify_callback`], [`ytmusic_callback`] - exchange the returned code for
//!   a token; the token either goes to the configured frontend (URL-safe base64
//!   JSON in the query string) or into the pending login the CLI waits on
//! - [`transfer`] - `POST /transfer`, runs one playlist transfer with the
//!   credentials from the request body
//!
//! ## Status Codes for `POST /transfer`
//!
//! | Result | Status |
//! |---|---|
//! | `SUCCESS` | 200 |
//! | `PARTIAL` | 207 |
//! | `FAILED`, empty source or no matches | 400 |
//! | `FAILED`, playlist could not be written | 500 |
//! | missing or rejected credential | 401 |
//! | bad input, unknown playlist | 400 |
//! | catalog error while reading | 502 |

mod authorize;
mod callback;
mod health;
mod transfer;

pub use authorize::{
    LOGIN_TTL_SECS, Login, MAX_PENDING_LOGINS, begin_login, spotify_authorize, ytmusic_authorize,
};
pub use callback::{spotify_callback, ytmusic_callback};
pub use health::health;
pub use transfer::{outcome_status, transfer};
