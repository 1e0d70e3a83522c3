//! Shared HTTP plumbing for the catalog clients.
//!
//! Every catalog call goes through [`send`], which maps response statuses onto
//! [`CatalogError`] and optionally retries rate limits and gateway errors.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::{CatalogError, ConfigError},
    utils, warning,
};

const MAX_ATTEMPTS: u32 = 3;
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BACKOFF_BASE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    /// Single attempt.
    Never,
    /// Retry 429 (honoring `Retry-After`) and 502/503 up to three attempts.
    Transient,
}

/// Builds a client whose requests time out after the configured budget.
pub fn build_client() -> Result<Client, ConfigError> {
    let timeout = config::request_timeout()?;
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::Invalid {
            key: "REQUEST_TIMEOUT_SECS",
            message: e.to_string(),
        })
}

/// Sends the request and returns the response if its status is a success.
pub async fn send(request: RequestBuilder, retry: Retry) -> Result<Response, CatalogError> {
    let mut attempt = 1;

    loop {
        let pending = match (retry, request.try_clone()) {
            (Retry::Transient, Some(clone)) if attempt < MAX_ATTEMPTS => clone,
            // last attempt, or the body cannot be replayed
            _ => return check_status(request.send().await?).await,
        };

        let response = pending.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_secs(&response).unwrap_or(1);
            if retry_after <= MAX_RETRY_AFTER_SECS {
                sleep(Duration::from_secs(retry_after)).await;
                attempt += 1;
                continue;
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds, giving up.",
                retry_after
            );
        } else if status == StatusCode::BAD_GATEWAY || status == StatusCode::SERVICE_UNAVAILABLE {
            sleep(BACKOFF_BASE * 2u32.pow(attempt - 1)).await;
            attempt += 1;
            continue;
        }

        return check_status(response).await;
    }
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Maps a non-success status onto a [`CatalogError`].
pub async fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CatalogError::Unauthorized(status)),
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Err(CatalogError::NotFound(status)),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(CatalogError::Status {
                status,
                body: utils::truncate(&body, 200),
            })
        }
    }
}
