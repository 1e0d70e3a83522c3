use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    catalog::{DestinationCatalog, SourceCatalog},
    error::{CatalogError, TransferError},
    info, success,
    transfer::{normalize::normalize_playlist_id, resolver},
    types::{
        BearerCredential, FailureKind, MatchResult, Provider, RawTrack, TrackDescriptor,
        TransferFailure, TransferOutcome, TransferPhase, TransferRequest, TransferStatus,
        Visibility,
    },
    warning,
};

/// Unmatched tracks listed in an outcome.
pub const UNMATCHED_DISPLAY_LIMIT: usize = 10;

/// One playlist copy from a source catalog to a destination catalog.
///
/// A run moves through `VALIDATING -> READING_SOURCE -> RESOLVING ->
/// CREATING_DESTINATION -> COMPLETE`. Bad input, rejected credentials and an
/// unreadable source end the run with a [`TransferError`]. An empty source,
/// zero matches or a failed playlist write end it with a `FAILED` outcome.
pub struct Transfer<'a> {
    source: &'a dyn SourceCatalog,
    destination: &'a dyn DestinationCatalog,
    progress: ProgressBar,
}

impl<'a> Transfer<'a> {
    pub fn new(source: &'a dyn SourceCatalog, destination: &'a dyn DestinationCatalog) -> Self {
        Self {
            source,
            destination,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports per-track resolution on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(&self, request: TransferRequest) -> Result<TransferOutcome, TransferError> {
        let source_provider = self.source.provider();
        let destination_provider = self.destination.provider();

        // VALIDATING
        let source_credential = present(request.source_credential, source_provider)?;
        let destination_credential = present(request.destination_credential, destination_provider)?;

        let playlist_id = normalize_playlist_id(&request.source_playlist_id)
            .ok_or_else(|| TransferError::Validation("Playlist identifier is required.".into()))?
            .to_string();

        self.source
            .probe(&source_credential)
            .await
            .map_err(|e| TransferError::authentication(source_provider, e.to_string()))?;
        self.destination
            .probe(&destination_credential)
            .await
            .map_err(|e| TransferError::authentication(destination_provider, e.to_string()))?;

        // READING_SOURCE
        info!("Reading {} playlist {}", source_provider, playlist_id);
        let source_name = self
            .source
            .playlist_name(&source_credential, &playlist_id)
            .await
            .map_err(|e| source_error(source_provider, &playlist_id, e))?;
        let tracks = read_tracks(self.source, &source_credential, &playlist_id)
            .await
            .map_err(|e| source_error(source_provider, &playlist_id, e))?;

        let mut outcome = TransferOutcome {
            source_playlist_name: source_name.clone(),
            destination_playlist_name: None,
            total_source_tracks: tracks.len(),
            matched_count: 0,
            unmatched_count: 0,
            unmatched_tracks: Vec::new(),
            destination_playlist_id: None,
            status: TransferStatus::Failed,
            failure: None,
        };

        if tracks.is_empty() {
            outcome.failure = Some(TransferFailure {
                phase: TransferPhase::ReadingSource,
                kind: FailureKind::EmptySource,
                message: format!("No tracks found in the {} playlist", source_provider),
            });
            return Ok(outcome);
        }
        info!("Found {} tracks in '{}'", tracks.len(), source_name);

        // RESOLVING
        let results = self.resolve_all(&destination_credential, tracks).await;
        let (matched, unmatched): (Vec<MatchResult>, Vec<MatchResult>) =
            results.into_iter().partition(MatchResult::matched);

        outcome.matched_count = matched.len();
        outcome.unmatched_count = unmatched.len();
        outcome.unmatched_tracks = unmatched
            .into_iter()
            .take(UNMATCHED_DISPLAY_LIMIT)
            .map(MatchResult::into_track)
            .collect();

        if matched.is_empty() {
            outcome.failure = Some(TransferFailure {
                phase: TransferPhase::Resolving,
                kind: FailureKind::NoMatches,
                message: format!("No songs could be found on {}", destination_provider),
            });
            return Ok(outcome);
        }
        info!(
            "Found {} songs on {}, {} not found",
            outcome.matched_count, destination_provider, outcome.unmatched_count
        );

        // CREATING_DESTINATION
        let title = request
            .destination_playlist_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{} (from {})", source_name, source_provider));
        let description = format!(
            "Transferred from {} playlist '{}'",
            source_provider, source_name
        );
        let item_ids: Vec<String> = matched
            .iter()
            .filter_map(|m| m.destination_item_id().map(str::to_string))
            .collect();
        outcome.destination_playlist_name = Some(title.clone());

        let written = match self
            .destination
            .create_playlist(&destination_credential, &title, &description, Visibility::Private)
            .await
        {
            Ok(playlist_id) => {
                outcome.destination_playlist_id = Some(playlist_id.clone());
                self.destination
                    .add_items(&destination_credential, &playlist_id, &item_ids, true)
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            warning!("Failed to write {} playlist '{}': {}", destination_provider, title, e);
            outcome.failure = Some(TransferFailure {
                phase: TransferPhase::CreatingDestination,
                kind: FailureKind::Destination,
                message: format!("Failed to create {} playlist: {}", destination_provider, e),
            });
            return Ok(outcome);
        }

        // COMPLETE
        outcome.status = if outcome.unmatched_count == 0 {
            TransferStatus::Success
        } else {
            TransferStatus::Partial
        };
        success!(
            "Transferred {} of {} tracks to '{}'",
            outcome.matched_count,
            outcome.total_source_tracks,
            title
        );

        Ok(outcome)
    }

    /// Resolves every track in source order.
    async fn resolve_all(
        &self,
        credential: &BearerCredential,
        tracks: Vec<TrackDescriptor>,
    ) -> Vec<MatchResult> {
        self.progress.set_length(tracks.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}") {
            self.progress
                .set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }

        let mut results = Vec::with_capacity(tracks.len());
        for track in tracks {
            self.progress
                .set_message(format!("{} - {}", track.title, track.artist));
            results.push(resolver::resolve(self.destination, credential, track).await);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        results
    }
}

fn present(
    credential: Option<BearerCredential>,
    provider: Provider,
) -> Result<BearerCredential, TransferError> {
    match credential {
        Some(c) if !c.is_blank() => Ok(c),
        _ => Err(TransferError::authentication(
            provider,
            format!("Please authorize {} first.", provider),
        )),
    }
}

fn source_error(provider: Provider, playlist_id: &str, err: CatalogError) -> TransferError {
    match &err {
        CatalogError::NotFound(_) => TransferError::NotFound(format!(
            "{} playlist '{}' ({})",
            provider, playlist_id, err
        )),
        CatalogError::Unauthorized(_) => TransferError::authentication(provider, err.to_string()),
        _ => TransferError::external(provider, err),
    }
}

/// Reads all pages of a playlist and keeps the entries that can be searched
/// for: a track must be present and have a title and at least one artist.
pub async fn read_tracks<S>(
    source: &S,
    credential: &BearerCredential,
    playlist_id: &str,
) -> Result<Vec<TrackDescriptor>, CatalogError>
where
    S: SourceCatalog + ?Sized,
{
    let mut tracks = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = source
            .playlist_page(credential, playlist_id, cursor.as_deref())
            .await?;

        tracks.extend(page.entries.into_iter().flatten().filter_map(into_descriptor));

        match page.next {
            Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
            _ => break,
        }
    }

    Ok(tracks)
}

fn into_descriptor(raw: RawTrack) -> Option<TrackDescriptor> {
    let title = raw.title.filter(|t| !t.is_empty())?;
    if raw.artists.is_empty() {
        return None;
    }

    Some(TrackDescriptor {
        title,
        artist: raw.artists.join(", "),
        source_reference: raw.reference,
    })
}
