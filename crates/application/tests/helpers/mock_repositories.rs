use async_trait::async_trait;
use geoquery_application::ports::{GeoRecordRepository, OriginClient};
use geoquery_domain::{DomainError, GeoRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub fn geo_record(query: &str) -> GeoRecord {
    GeoRecord::new(query)
        .with_status("success")
        .with_country("United States", "US")
        .with_city("Mountain View")
        .with_coordinates(37.4056, -122.0775)
}

#[derive(Clone, Default)]
pub struct InMemoryGeoRecordRepository {
    records: Arc<RwLock<HashMap<String, GeoRecord>>>,
    find_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    fail_find: Arc<RwLock<bool>>,
    fail_create: Arc<RwLock<bool>>,
}

impl InMemoryGeoRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, record: GeoRecord) {
        self.records
            .write()
            .await
            .insert(record.query.to_string(), record);
    }

    pub async fn get(&self, query: &str) -> Option<GeoRecord> {
        self.records.read().await.get(query).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn set_fail_find(&self, fail: bool) {
        *self.fail_find.write().await = fail;
    }

    pub async fn set_fail_create(&self, fail: bool) {
        *self.fail_create.write().await = fail;
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoRecordRepository for InMemoryGeoRecordRepository {
    async fn find_by_query(&self, query: &str) -> Result<Option<GeoRecord>, DomainError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_find.read().await {
            return Err(DomainError::DatabaseError("store offline".to_string()));
        }
        Ok(self.records.read().await.get(query).cloned())
    }

    async fn create(&self, record: GeoRecord) -> Result<GeoRecord, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_create.read().await {
            return Err(DomainError::DatabaseError("disk full".to_string()));
        }

        let mut records = self.records.write().await;
        if records.contains_key(record.query.as_ref()) {
            return Err(DomainError::DuplicateRecord(record.query.to_string()));
        }
        records.insert(record.query.to_string(), record.clone());
        Ok(record)
    }
}

#[derive(Clone, Default)]
pub struct MockOriginClient {
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    delay: Option<Duration>,
    should_fail: Arc<RwLock<bool>>,
    reported_query: Option<Arc<str>>,
    reported_status: Option<Arc<str>>,
}

impl MockOriginClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes the origin echo `query` instead of the requested key.
    pub fn reporting_query(mut self, query: &str) -> Self {
        self.reported_query = Some(Arc::from(query));
        self
    }

    /// Answers with `status` instead of `"success"`.
    pub fn reporting_status(mut self, status: &str) -> Self {
        self.reported_status = Some(Arc::from(status));
        self
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl OriginClient for MockOriginClient {
    async fn fetch(&self, query: &str) -> Result<GeoRecord, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        let _in_flight = InFlightGuard(Arc::clone(&self.in_flight));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.read().await {
            return Err(DomainError::OriginUnavailable(
                "connection refused".to_string(),
            ));
        }

        let mut record = geo_record(query);
        if let Some(ref reported) = self.reported_query {
            record.query = Arc::clone(reported);
        }
        if let Some(ref status) = self.reported_status {
            record.status = Some(Arc::clone(status));
        }
        Ok(record)
    }
}
