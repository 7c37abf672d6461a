use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Value of the `persisted` flag once a record is known to the store.
pub const PERSISTED_MARKER: &str = "true";

/// Geolocation record for a single lookup key (an address or a domain name).
///
/// The descriptive fields are carried through untouched; only `persisted`
/// is ever changed after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    pub query: Arc<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<Arc<str>>,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_name: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted: Option<String>,
}

impl GeoRecord {
    /// Creates an empty record for `query` with every payload field unset.
    pub fn new(query: impl Into<Arc<str>>) -> Self {
        Self {
            query: query.into(),
            status: None,
            country: None,
            country_code: None,
            region: None,
            region_name: None,
            city: None,
            zip: None,
            lat: None,
            lon: None,
            timezone: None,
            isp: None,
            org: None,
            as_name: None,
            persisted: None,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(Arc::from(status));
        self
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Some(Arc::from(city));
        self
    }

    pub fn with_country(mut self, country: &str, country_code: &str) -> Self {
        self.country = Some(Arc::from(country));
        self.country_code = Some(Arc::from(country_code));
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted.as_deref() == Some(PERSISTED_MARKER)
    }

    /// Sets the provenance flag. Returns `false` when it was already set.
    pub fn mark_persisted(&mut self) -> bool {
        if self.is_persisted() {
            return false;
        }
        self.persisted = Some(PERSISTED_MARKER.to_string());
        true
    }

    /// Copy of this record carrying the provenance flag, as written to the store.
    pub fn to_persisted(&self) -> Self {
        let mut copy = self.clone();
        copy.mark_persisted();
        copy
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}
