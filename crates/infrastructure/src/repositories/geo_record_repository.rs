use async_trait::async_trait;
use geoquery_application::ports::GeoRecordRepository;
use geoquery_domain::{DomainError, GeoRecord};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type GeoRecordRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<f64>,
    Option<f64>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

const SELECT_COLUMNS: &str = "query, status, country, country_code, region, region_name, city, zip, \
     lat, lon, timezone, isp, org, as_name, persisted";

pub struct SqliteGeoRecordRepository {
    pool: SqlitePool,
}

impl SqliteGeoRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: GeoRecordRow) -> GeoRecord {
        let (
            query,
            status,
            country,
            country_code,
            region,
            region_name,
            city,
            zip,
            lat,
            lon,
            timezone,
            isp,
            org,
            as_name,
            persisted,
        ) = row;
        let text = |s: Option<String>| s.map(|s| Arc::from(s.as_str()));

        GeoRecord {
            query: Arc::from(query.as_str()),
            status: text(status),
            country: text(country),
            country_code: text(country_code),
            region: text(region),
            region_name: text(region_name),
            city: text(city),
            zip: text(zip),
            lat,
            lon,
            timezone: text(timezone),
            isp: text(isp),
            org: text(org),
            as_name: text(as_name),
            persisted,
        }
    }
}

#[async_trait]
impl GeoRecordRepository for SqliteGeoRecordRepository {
    #[instrument(skip(self))]
    async fn find_by_query(&self, query: &str) -> Result<Option<GeoRecord>, DomainError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM geo_records WHERE query = ?");

        let row = sqlx::query_as::<_, GeoRecordRow>(&sql)
            .bind(query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query geo record");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(Self::row_to_record))
    }

    #[instrument(skip(self, record), fields(query = %record.query))]
    async fn create(&self, record: GeoRecord) -> Result<GeoRecord, DomainError> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query(
            "INSERT INTO geo_records (query, status, country, country_code, region, region_name,
                city, zip, lat, lon, timezone, isp, org, as_name, persisted, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.query.as_ref())
        .bind(record.status.as_deref())
        .bind(record.country.as_deref())
        .bind(record.country_code.as_deref())
        .bind(record.region.as_deref())
        .bind(record.region_name.as_deref())
        .bind(record.city.as_deref())
        .bind(record.zip.as_deref())
        .bind(record.lat)
        .bind(record.lon)
        .bind(record.timezone.as_deref())
        .bind(record.isp.as_deref())
        .bind(record.org.as_deref())
        .bind(record.as_name.as_deref())
        .bind(record.persisted.as_deref())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                DomainError::DuplicateRecord(format!(
                    "Geo record '{}' already exists",
                    record.query
                ))
            } else {
                error!(error = %e, "Failed to create geo record");
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        Ok(record)
    }
}
