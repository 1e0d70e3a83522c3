const WEB_MARKER: &str = "/playlist/";
const URI_MARKER: &str = ":playlist:";

/// Extracts the bare playlist id from user input.
///
/// Accepted forms, checked in order:
/// 1. a web URL containing `/playlist/<id>`, optionally followed by a query
///    string or fragment (`https://open.spotify.com/playlist/abc123?si=xyz`)
/// 2. a URI of the form `<scheme>:playlist:<id>` (`spotify:playlist:abc123`)
/// 3. the bare id itself
///
/// Returns `None` when nothing is left after extraction.
pub fn normalize_playlist_id(input: &str) -> Option<&str> {
    let input = input.trim();

    let id = if let Some((_, rest)) = input.split_once(WEB_MARKER) {
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    } else if input.contains(URI_MARKER) {
        input.rsplit(':').next().unwrap_or_default()
    } else {
        input
    };

    let id = id.trim();
    (!id.is_empty()).then_some(id)
}
