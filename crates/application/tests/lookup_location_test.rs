mod helpers;

use geoquery_application::services::TieredLookupCache;
use geoquery_application::use_cases::{GetCacheStatsUseCase, LookupLocationUseCase};
use geoquery_domain::config::CacheConfig;
use geoquery_domain::validators::{EMPTY_QUERY_MESSAGE, INVALID_QUERY_MESSAGE};
use geoquery_domain::DomainError;
use helpers::{InMemoryGeoRecordRepository, MockOriginClient};
use std::sync::Arc;

fn setup() -> (
    LookupLocationUseCase,
    GetCacheStatsUseCase,
    InMemoryGeoRecordRepository,
    MockOriginClient,
) {
    let store = InMemoryGeoRecordRepository::new();
    let origin = MockOriginClient::new();
    let cache = Arc::new(
        TieredLookupCache::new(
            &CacheConfig::default(),
            Arc::new(store.clone()),
            Arc::new(origin.clone()),
        )
        .unwrap(),
    );

    (
        LookupLocationUseCase::new(Arc::clone(&cache)),
        GetCacheStatsUseCase::new(cache),
        store,
        origin,
    )
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let (lookup, _, store, _) = setup();

    for raw in ["", "   "] {
        let err = lookup.execute(raw).await.unwrap_err();
        assert_eq!(err, DomainError::EmptyQuery(EMPTY_QUERY_MESSAGE.to_string()));
    }
    assert_eq!(store.find_calls(), 0);
}

#[tokio::test]
async fn test_invalid_query_never_reaches_the_cache() {
    let (lookup, _, store, origin) = setup();

    for raw in ["Not_A_Domain", "999.1.1.1", "localhost", "EXAMPLE.COM"] {
        let err = lookup.execute(raw).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidQuery(INVALID_QUERY_MESSAGE.to_string())
        );
    }
    assert_eq!(store.find_calls(), 0);
    assert_eq!(origin.calls(), 0);
}

#[tokio::test]
async fn test_lookup_trims_and_resolves() {
    let (lookup, _, store, _) = setup();

    let record = lookup.execute("  8.8.8.8 ").await.unwrap();

    assert_eq!(record.query.as_ref(), "8.8.8.8");
    assert!(store.get("8.8.8.8").await.is_some());
}

#[tokio::test]
async fn test_lookup_accepts_ipv6_and_domains() {
    let (lookup, _, _, origin) = setup();

    lookup.execute("2001:4860:4860::8888").await.unwrap();
    lookup.execute("dns.google").await.unwrap();
    lookup.execute("my-site.example.co.uk").await.unwrap();

    assert_eq!(origin.calls(), 3);
}

#[tokio::test]
async fn test_stats_reflect_lookups() {
    let (lookup, stats, _, _) = setup();

    lookup.execute("1.1.1.1").await.unwrap();
    lookup.execute("1.1.1.1").await.unwrap();

    let snapshot = stats.execute();
    assert_eq!(snapshot.total_entries, 1);
    assert_eq!(snapshot.capacity, 10_000);
    assert_eq!(snapshot.expire_after_access_secs, Some(600));
    assert_eq!(snapshot.hits, 1);
    assert_eq!(snapshot.misses, 1);
    assert_eq!(snapshot.origin_fetches, 1);
}
