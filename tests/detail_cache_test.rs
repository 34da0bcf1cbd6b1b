mod common;

use common::*;
use edmliveset::{ClientEvent, LiveSetClient, LiveSetError};

#[test_log::test(tokio::test)]
async fn test_repeated_lookup_fetches_once() {
    let fixtures = catalog_fixtures();
    let client = create_test_client(&fixtures);
    let url = format!("{BASE}/armin-van-buuren-asot-1000/");

    let first = client
        .get_track("edmlive:/armin-van-buuren-asot-1000")
        .await
        .unwrap();
    let second = client
        .get_track("edmlive:/armin-van-buuren-asot-1000")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fixtures.hits(&url), 1);
    assert_eq!(client.cached_tracks(), 1);
}

#[test_log::test(tokio::test)]
async fn test_identifier_and_urls_share_cache_entry() {
    let fixtures = catalog_fixtures();
    let client = create_test_client(&fixtures);
    let url = format!("{BASE}/martin-garrix-ultra-2024/");

    let by_url = client.get_track(&url).await.unwrap();
    let by_relative = client.get_track("/martin-garrix-ultra-2024").await.unwrap();
    let by_id = client
        .get_track("edmlive:/martin-garrix-ultra-2024")
        .await
        .unwrap();

    assert_eq!(by_url.id(), "edmlive:/martin-garrix-ultra-2024");
    assert_eq!(by_url, by_relative);
    assert_eq!(by_url, by_id);
    assert_eq!(fixtures.hits(&url), 1);
}

#[test_log::test(tokio::test)]
async fn test_cache_is_shared_between_clones() {
    let fixtures = catalog_fixtures();
    let client = create_test_client(&fixtures);
    let clone = client.clone();

    client
        .get_track("edmlive:/armin-van-buuren-asot-1000")
        .await
        .unwrap();
    clone
        .get_track("edmlive:/armin-van-buuren-asot-1000")
        .await
        .unwrap();

    assert_eq!(fixtures.requests().len(), 1);
    assert_eq!(clone.cached_tracks(), 1);
}

#[test_log::test(tokio::test)]
async fn test_failed_lookup_is_not_cached() {
    let url = format!("{BASE}/gone-set/");
    let fixtures = FixtureClient::new().status(&url, 404);
    let client = create_test_client(&fixtures);

    for _ in 0..2 {
        let err = client.get_track("edmlive:/gone-set").await.unwrap_err();
        assert!(matches!(err, LiveSetError::Fetch { status: 404, .. }));
    }

    assert_eq!(fixtures.hits(&url), 2);
    assert_eq!(client.cached_tracks(), 0);
}

#[test_log::test(tokio::test)]
async fn test_cache_hit_is_broadcast() {
    let fixtures = catalog_fixtures();
    let client = create_test_client(&fixtures);

    client
        .get_track("edmlive:/armin-van-buuren-asot-1000")
        .await
        .unwrap();
    assert!(matches!(
        client.latest_event(),
        Some(ClientEvent::RequestCompleted {
            status_code: 200,
            ..
        })
    ));

    client
        .get_track(&format!("{BASE}/armin-van-buuren-asot-1000/"))
        .await
        .unwrap();
    assert_eq!(
        client.latest_event(),
        Some(ClientEvent::CacheHit {
            track_id: "edmlive:/armin-van-buuren-asot-1000".to_string()
        })
    );
}
