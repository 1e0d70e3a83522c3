use crate::{
    catalog::DestinationCatalog,
    error::CatalogError,
    types::{BearerCredential, Category, MatchResult, MatchTier, TrackDescriptor},
    warning,
};

/// Results requested per search call.
pub const SEARCH_LIMIT: usize = 5;

pub fn search_query(track: &TrackDescriptor) -> String {
    format!("{} {}", track.title, track.artist)
}

/// Finds the destination item for one source track.
///
/// Tiers, first match wins:
/// 1. the first song-category hit of a song search
/// 2. the first hit of that search, whatever its category
/// 3. the first hit of a video search, only when the song search found nothing
///
/// A failed search is logged and the track is reported as not found; it is
/// never retried and never aborts the caller.
pub async fn resolve<D>(
    destination: &D,
    credential: &BearerCredential,
    track: TrackDescriptor,
) -> MatchResult
where
    D: DestinationCatalog + ?Sized,
{
    let query = search_query(&track);

    match select(destination, credential, &query).await {
        Ok(Some((item_id, tier))) => MatchResult::found(track, item_id, tier),
        Ok(None) => MatchResult::not_found(track),
        Err(e) => {
            warning!("Search failed for '{}': {}", query, e);
            MatchResult::not_found(track)
        }
    }
}

async fn select<D>(
    destination: &D,
    credential: &BearerCredential,
    query: &str,
) -> Result<Option<(String, MatchTier)>, CatalogError>
where
    D: DestinationCatalog + ?Sized,
{
    let songs = destination
        .search(credential, query, Category::Song, SEARCH_LIMIT)
        .await?;

    if let Some(hit) = songs.iter().find(|hit| hit.category == Category::Song) {
        return Ok(Some((hit.id.clone(), MatchTier::ExactSong)));
    }
    if let Some(hit) = songs.into_iter().next() {
        return Ok(Some((hit.id, MatchTier::FallbackFirstResult)));
    }

    let videos = destination
        .search(credential, query, Category::Video, SEARCH_LIMIT)
        .await?;

    Ok(videos
        .into_iter()
        .next()
        .map(|hit| (hit.id, MatchTier::FallbackVideo)))
}
