mod common;

use common::{FakeDestination, FakeSource, raw, request, song, video};
use playlist_bridge::{
    error::TransferError,
    transfer::{Transfer, UNMATCHED_DISPLAY_LIMIT},
    types::{FailureKind, Provider, RawTrack, TransferPhase, TransferStatus, Visibility},
};

#[tokio::test]
async fn test_all_tracks_match_exactly() {
    let source = FakeSource::new(
        "Road Trip",
        vec![vec![
            raw("One", &["A"]),
            raw("Two", &["B", "C"]),
            raw("Three", &["D"]),
        ]],
    );
    let destination = FakeDestination::new()
        .songs("One A", vec![song("s1")])
        .songs("Two B, C", vec![song("s2")])
        .songs("Three D", vec![song("s3")]);

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Success);
    assert_eq!(outcome.total_source_tracks, 3);
    assert_eq!(outcome.matched_count, 3);
    assert!(outcome.unmatched_tracks.is_empty());
    assert_eq!(outcome.destination_playlist_id.as_deref(), Some("PL-new"));
    assert!(outcome.failure.is_none());

    assert_eq!(
        destination.created(),
        vec![(
            "Road Trip (from Spotify)".to_string(),
            "Transferred from Spotify playlist 'Road Trip'".to_string(),
            Visibility::Private
        )]
    );
    assert_eq!(
        destination.added(),
        vec![(
            "PL-new".to_string(),
            vec!["s1".to_string(), "s2".to_string(), "s3".to_string()],
            true
        )]
    );
}

#[tokio::test]
async fn test_partial_when_some_tracks_are_missing() {
    let source = FakeSource::new(
        "Mix",
        vec![vec![raw("Found", &["A"]), raw("Lost", &["B"])]],
    );
    let destination = FakeDestination::new().songs("Found A", vec![video("v1")]);

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Partial);
    assert_eq!(outcome.matched_count, 1);
    assert_eq!(outcome.unmatched_count, 1);
    assert_eq!(outcome.unmatched_tracks.len(), 1);
    assert_eq!(outcome.unmatched_tracks[0].title, "Lost");
    assert_eq!(destination.added()[0].1, vec!["v1".to_string()]);
}

#[tokio::test]
async fn test_no_playable_tracks_fails_without_playlist() {
    let source = FakeSource::new(
        "Ghosts",
        vec![vec![
            None,
            Some(RawTrack {
                title: None,
                artists: vec!["A".into()],
                reference: None,
            }),
            Some(RawTrack {
                title: Some("No Artist".into()),
                artists: vec![],
                reference: None,
            }),
        ]],
    );
    let destination = FakeDestination::new();

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Failed);
    assert_eq!(outcome.total_source_tracks, 0);
    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::EmptySource);
    assert_eq!(failure.phase, TransferPhase::ReadingSource);
    assert!(destination.searches().is_empty());
    assert!(destination.created().is_empty());
}

#[tokio::test]
async fn test_zero_matches_fails_without_playlist() {
    let source = FakeSource::new("Obscure", vec![vec![raw("Nobody", &["Knows"])]]);
    let destination = FakeDestination::new();

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Failed);
    assert_eq!(outcome.failure.unwrap().kind, FailureKind::NoMatches);
    assert_eq!(outcome.unmatched_count, 1);
    assert!(destination.created().is_empty());
    assert!(destination.added().is_empty());
}

#[tokio::test]
async fn test_destination_probe_failure_stops_before_reading() {
    let source = FakeSource::new("Road Trip", vec![vec![raw("One", &["A"])]]);
    let destination = FakeDestination {
        reject_probe: true,
        ..FakeDestination::new()
    };

    let err = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap_err();

    match err {
        TransferError::Authentication { provider, .. } => {
            assert_eq!(provider, Provider::YouTubeMusic)
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(source.calls(), vec!["probe".to_string()]);
}

#[tokio::test]
async fn test_source_probe_failure_names_source() {
    let source = FakeSource {
        reject_probe: true,
        ..FakeSource::new("Road Trip", vec![])
    };
    let destination = FakeDestination::new();

    let err = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransferError::Authentication {
            provider: Provider::Spotify,
            ..
        }
    ));
}

#[tokio::test]
async fn test_missing_credential_is_authentication_error() {
    let source = FakeSource::new("Road Trip", vec![]);
    let destination = FakeDestination::new();

    let mut req = request("abc123");
    req.destination_credential = None;

    let err = Transfer::new(&source, &destination)
        .run(req)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransferError::Authentication {
            provider: Provider::YouTubeMusic,
            ..
        }
    ));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_empty_playlist_id_is_validation_error() {
    let source = FakeSource::new("Road Trip", vec![]);
    let destination = FakeDestination::new();

    let err = Transfer::new(&source, &destination)
        .run(request("  "))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::Validation(_)));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_playlist_is_not_found() {
    let source = FakeSource {
        missing_playlist: true,
        ..FakeSource::new("Road Trip", vec![])
    };
    let destination = FakeDestination::new();

    let err = Transfer::new(&source, &destination)
        .run(request("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::NotFound(_)));
}

#[tokio::test]
async fn test_reads_every_page_in_order() {
    let source = FakeSource::new(
        "Long",
        vec![
            vec![raw("One", &["A"]), None],
            vec![raw("Two", &["A"])],
            vec![raw("Three", &["A"])],
        ],
    );
    let destination = FakeDestination::new()
        .songs("One A", vec![song("s1")])
        .songs("Two A", vec![song("s2")])
        .songs("Three A", vec![song("s3")]);

    let outcome = Transfer::new(&source, &destination)
        .run(request("https://open.spotify.com/playlist/abc123?si=xyz"))
        .await
        .unwrap();

    assert_eq!(outcome.total_source_tracks, 3);
    assert_eq!(
        source.calls(),
        vec![
            "probe".to_string(),
            "name:abc123".to_string(),
            "page:abc123:-".to_string(),
            "page:abc123:page-1".to_string(),
            "page:abc123:page-2".to_string(),
        ]
    );
    assert_eq!(
        destination.added()[0].1,
        vec!["s1".to_string(), "s2".to_string(), "s3".to_string()]
    );
}

#[tokio::test]
async fn test_unmatched_list_is_capped_but_counted() {
    let tracks: Vec<_> = (0..15)
        .map(|i| raw(&format!("Track {}", i), &["A"]))
        .collect();
    let source = FakeSource::new("Big", vec![tracks]);
    let destination = FakeDestination::new()
        .songs("Track 0 A", vec![song("s0")])
        .songs("Track 7 A", vec![song("s7")])
        .songs("Track 14 A", vec![song("s14")]);

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Partial);
    assert_eq!(outcome.matched_count, 3);
    assert_eq!(outcome.unmatched_count, 12);
    assert_eq!(
        outcome.matched_count + outcome.unmatched_count,
        outcome.total_source_tracks
    );
    assert_eq!(outcome.unmatched_tracks.len(), UNMATCHED_DISPLAY_LIMIT);
    assert_eq!(outcome.unmatched_tracks[0].title, "Track 1");
    assert_eq!(outcome.unmatched_tracks[9].title, "Track 11");
}

#[tokio::test]
async fn test_search_failure_only_affects_that_track() {
    let source = FakeSource::new(
        "Flaky",
        vec![vec![raw("One", &["A"]), raw("Two", &["A"])]],
    );
    let destination = FakeDestination::new()
        .failing("One A")
        .songs("Two A", vec![song("s2")]);

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Partial);
    assert_eq!(outcome.unmatched_tracks[0].title, "One");
}

#[tokio::test]
async fn test_custom_playlist_name() {
    let source = FakeSource::new("Road Trip", vec![vec![raw("One", &["A"])]]);
    let destination = FakeDestination::new().songs("One A", vec![song("s1")]);

    let mut req = request("abc123");
    req.destination_playlist_name = Some("Summer".into());

    let outcome = Transfer::new(&source, &destination)
        .run(req)
        .await
        .unwrap();

    assert_eq!(outcome.destination_playlist_name.as_deref(), Some("Summer"));
    assert_eq!(destination.created()[0].0, "Summer");
}

#[tokio::test]
async fn test_create_failure_is_failed_outcome() {
    let source = FakeSource::new("Road Trip", vec![vec![raw("One", &["A"])]]);
    let destination = FakeDestination {
        fail_create: true,
        ..FakeDestination::new().songs("One A", vec![song("s1")])
    };

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Failed);
    assert_eq!(outcome.matched_count, 1);
    assert_eq!(outcome.destination_playlist_id, None);
    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Destination);
    assert_eq!(failure.phase, TransferPhase::CreatingDestination);
    assert!(destination.added().is_empty());
}

#[tokio::test]
async fn test_add_failure_keeps_created_playlist_id() {
    let source = FakeSource::new("Road Trip", vec![vec![raw("One", &["A"])]]);
    let destination = FakeDestination {
        fail_add: true,
        ..FakeDestination::new().songs("One A", vec![song("s1")])
    };

    let outcome = Transfer::new(&source, &destination)
        .run(request("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome.status, TransferStatus::Failed);
    assert_eq!(outcome.destination_playlist_id.as_deref(), Some("PL-new"));
    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Destination);
}
