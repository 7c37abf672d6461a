use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use futures::future::join_all;
use geoquery_api::{create_api_routes, AppState};
use geoquery_application::ports::GeoRecordRepository;
use geoquery_application::services::TieredLookupCache;
use geoquery_application::use_cases::{GetCacheStatsUseCase, LookupLocationUseCase};
use geoquery_domain::config::{CacheConfig, DatabaseConfig, OriginConfig};
use geoquery_infrastructure::database::create_pool;
use geoquery_infrastructure::origin::HttpOriginClient;
use geoquery_infrastructure::repositories::SqliteGeoRecordRepository;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct Harness {
    app: Router,
    store: Arc<SqliteGeoRecordRepository>,
    origin_calls: Arc<AtomicUsize>,
}

async fn ip_api(
    State(calls): State<Arc<AtomicUsize>>,
    Path(query): Path<String>,
) -> Json<Value> {
    calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;
    Json(json!({
        "status": "success",
        "country": "United States",
        "countryCode": "US",
        "regionName": "North Carolina",
        "city": "Charlotte",
        "lat": 35.2271,
        "lon": -80.8431,
        "isp": "Charter Communications",
        "as": "AS20115 Charter Communications",
        "query": query
    }))
}

async fn unavailable(
    State(calls): State<Arc<AtomicUsize>>,
    Path(_query): Path<String>,
) -> StatusCode {
    calls.fetch_add(1, Ordering::SeqCst);
    StatusCode::SERVICE_UNAVAILABLE
}

async fn spawn_origin(calls: Arc<AtomicUsize>) -> String {
    let app = Router::new()
        .route("/json/{query}", get(ip_api))
        .route("/down/{query}", get(unavailable))
        .with_state(calls);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn harness(max_entries: i64, origin_path: &str) -> Harness {
    let db = DatabaseConfig {
        max_connections: 1,
        migrations_path: "../migrations".to_string(),
        ..DatabaseConfig::default()
    };
    let pool = create_pool("sqlite::memory:", &db).await.unwrap();
    let store = Arc::new(SqliteGeoRecordRepository::new(pool));

    let origin_calls = Arc::new(AtomicUsize::new(0));
    let base = spawn_origin(Arc::clone(&origin_calls)).await;
    let origin = HttpOriginClient::new(&OriginConfig {
        base_url: format!("{}{}", base, origin_path),
        timeout_secs: 5,
    })
    .unwrap();

    let cache_config = CacheConfig {
        max_entries,
        ..CacheConfig::default()
    };
    let cache = Arc::new(
        TieredLookupCache::new(&cache_config, store.clone(), Arc::new(origin)).unwrap(),
    );

    let state = AppState {
        lookup: Arc::new(LookupLocationUseCase::new(Arc::clone(&cache))),
        cache_stats: Arc::new(GetCacheStatsUseCase::new(cache)),
    };

    Harness {
        app: create_api_routes(state),
        store,
        origin_calls,
    }
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_fresh_lookup_is_persisted_and_then_served_from_memory() {
    let h = harness(100, "/json/").await;

    let (status, first) = get_json(&h.app, "/geolocation/ip/71.76.72.122").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["query"], "71.76.72.122");
    assert_eq!(first["city"], "Charlotte");
    assert!(first.get("persisted").is_none());

    let stored = h.store.find_by_query("71.76.72.122").await.unwrap().unwrap();
    assert!(stored.is_persisted());

    let (_, second) = get_json(&h.app, "/geolocation/ip/71.76.72.122").await;
    assert_eq!(second, first);
    assert_eq!(h.origin_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_evicted_lookup_comes_back_from_store() {
    let h = harness(1, "/json/").await;

    get_json(&h.app, "/geolocation/ip/71.76.72.122").await;
    get_json(&h.app, "/geolocation/ip/dns.google").await;
    let (status, again) = get_json(&h.app, "/geolocation/ip/71.76.72.122").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["persisted"], "true");
    assert_eq!(h.origin_calls.load(Ordering::SeqCst), 2);

    let (_, stats) = get_json(&h.app, "/cache/stats").await;
    assert_eq!(stats["total_entries"], 1);
    assert_eq!(stats["store_hits"], 1);
    assert_eq!(stats["evictions"], 2);
}

#[tokio::test]
async fn test_concurrent_requests_hit_origin_once() {
    let h = harness(100, "/json/").await;

    let responses = join_all((0..10).map(|_| get_json(&h.app, "/geolocation/ip/24.48.0.1"))).await;

    for (status, body) in &responses {
        assert_eq!(*status, StatusCode::OK);
        assert_eq!(body["query"], "24.48.0.1");
    }
    assert_eq!(h.origin_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_origin_outage_surfaces_and_writes_nothing() {
    let h = harness(100, "/down/").await;

    let (status, body) = get_json(&h.app, "/geolocation/ip/9.9.9.9").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("503"));
    assert!(h.store.find_by_query("9.9.9.9").await.unwrap().is_none());

    get_json(&h.app, "/geolocation/ip/9.9.9.9").await;
    assert_eq!(h.origin_calls.load(Ordering::SeqCst), 2);
}
