use std::time::Duration;

use indicatif::ProgressBar;
use tabled::Table;

use crate::{
    error,
    management::TokenManager,
    spotify::playlist::SpotifyClient,
    success,
    transfer::Transfer,
    types::{
        BearerCredential, Provider, TrackTableRow, TransferOutcome, TransferRequest,
        TransferStatus,
    },
    warning,
    ytmusic::client::YtMusicClient,
};

async fn cached_credential(provider: Provider) -> BearerCredential {
    let mut token_mgr = match TokenManager::load(provider).await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load {} token. Please run playlist-bridge auth {}\n Error: {}",
            provider,
            provider.slug(),
            e
        ),
    };

    match token_mgr.get_valid_token().await {
        Ok(token) => token.credential(),
        Err(e) => error!(
            "{} token is no longer valid. Please run playlist-bridge auth {}\n Error: {}",
            provider,
            provider.slug(),
            e
        ),
    }
}

/// Copies `playlist` to YouTube Music with the cached tokens.
pub async fn transfer(playlist: String, name: Option<String>) {
    let source_credential = cached_credential(Provider::Spotify).await;
    let destination_credential = cached_credential(Provider::YouTubeMusic).await;

    let (source, destination) = match (SpotifyClient::from_config(), YtMusicClient::from_config()) {
        (Ok(s), Ok(d)) => (s, d),
        (Err(e), _) | (_, Err(e)) => error!("Invalid configuration: {}", e),
    };

    let progress = ProgressBar::new(0);
    progress.enable_steady_tick(Duration::from_millis(100));

    let request = TransferRequest {
        source_playlist_id: playlist,
        destination_playlist_name: name,
        source_credential: Some(source_credential),
        destination_credential: Some(destination_credential),
    };

    let outcome = match Transfer::new(&source, &destination)
        .with_progress(progress)
        .run(request)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => error!("{}", e),
    };

    report(&outcome);
}

fn report(outcome: &TransferOutcome) {
    if !outcome.unmatched_tracks.is_empty() {
        warning!(
            "{} songs could not be found on YouTube Music",
            outcome.unmatched_count
        );
        let rows: Vec<TrackTableRow> = outcome
            .unmatched_tracks
            .iter()
            .map(TrackTableRow::from)
            .collect();
        println!("{}", Table::new(rows));
    }

    match outcome.status {
        TransferStatus::Success | TransferStatus::Partial => {
            success!(
                "Playlist '{}' created with {} of {} songs (id: {})",
                outcome.destination_playlist_name.as_deref().unwrap_or_default(),
                outcome.matched_count,
                outcome.total_source_tracks,
                outcome.destination_playlist_id.as_deref().unwrap_or_default()
            );
        }
        TransferStatus::Failed => {
            let reason = outcome
                .failure
                .as_ref()
                .map(|f| f.message.as_str())
                .unwrap_or("Transfer failed");
            error!("{}", reason);
        }
    }
}
