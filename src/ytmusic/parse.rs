//! Extraction of search hits from YouTube Music `search` responses.
//!
//! Results are nested several renderers deep and the nesting differs between
//! filtered and unfiltered searches, so the list items are collected wherever
//! they occur, in document order.

use serde_json::Value;

use crate::types::{Category, SearchHit};

const LIST_ITEM: &str = "musicResponsiveListItemRenderer";
const TITLE: &str = "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text";
const SUBTITLE: &str = "/flexColumns/1/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text";
const VIDEO_ID: &str = "/playlistItemData/videoId";
const PLAY_VIDEO_ID: &str = "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId";

/// Returns the playable hits of a search response, best ranked first.
///
/// Filtered searches (`Song`, `Video`) only return items of that category, and
/// their first subtitle run is the artist, so every hit takes `requested`. In
/// unfiltered searches (`Other`) the first run is the type label ("Song",
/// "Video", "Album", ...). Items without a video id are skipped.
pub fn search_hits(response: &Value, requested: Category) -> Vec<SearchHit> {
    let mut items = Vec::new();
    collect_list_items(response, &mut items);

    items
        .into_iter()
        .filter_map(|item| {
            let id = item
                .pointer(VIDEO_ID)
                .or_else(|| item.pointer(PLAY_VIDEO_ID))
                .and_then(Value::as_str)?
                .to_string();
            let title = item
                .pointer(TITLE)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let category = match requested {
                Category::Other => item
                    .pointer(SUBTITLE)
                    .and_then(Value::as_str)
                    .and_then(type_label)
                    .unwrap_or(Category::Other),
                filtered => filtered,
            };

            Some(SearchHit {
                id,
                title,
                category,
            })
        })
        .collect()
}

fn collect_list_items<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == LIST_ITEM {
                    out.push(child);
                } else {
                    collect_list_items(child, out);
                }
            }
        }
        Value::Array(children) => {
            for child in children {
                collect_list_items(child, out);
            }
        }
        _ => {}
    }
}

/// Maps a result type label onto a category.
fn type_label(label: &str) -> Option<Category> {
    match label.trim().to_lowercase().as_str() {
        "song" => Some(Category::Song),
        "video" => Some(Category::Video),
        "album" | "single" | "ep" | "playlist" | "artist" | "episode" | "podcast" | "profile" => {
            Some(Category::Other)
        }
        _ => None,
    }
}
