use async_trait::async_trait;
use geoquery_application::ports::OriginClient;
use geoquery_domain::config::OriginConfig;
use geoquery_domain::{DomainError, GeoRecord};
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("geoquery/", env!("CARGO_PKG_VERSION"));

/// Remote lookup over HTTP: `GET {base_url}{query}` answered with a JSON record.
pub struct HttpOriginClient {
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpOriginClient {
    pub fn new(cfg: &OriginConfig) -> Result<Self, DomainError> {
        let timeout = Duration::from_secs(cfg.timeout_secs);
        let http_client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self {
            base_url: cfg.base_url.clone(),
            timeout,
            http_client,
        })
    }

    fn lookup_url(&self, query: &str) -> String {
        format!("{}{}", self.base_url, query)
    }

    fn map_transport_error(&self, query: &str, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::OriginTimeout {
                query: query.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            DomainError::OriginUnavailable(e.to_string())
        }
    }
}

#[async_trait]
impl OriginClient for HttpOriginClient {
    #[instrument(skip(self))]
    async fn fetch(&self, query: &str) -> Result<GeoRecord, DomainError> {
        let url = self.lookup_url(query);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(query, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::OriginUnavailable(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(query, e))?;

        let record: GeoRecord = serde_json::from_slice(&body)
            .map_err(|e| DomainError::InvalidOriginResponse(e.to_string()))?;

        debug!(
            query = %query,
            status = ?record.status,
            bytes = body.len(),
            "Origin responded"
        );

        Ok(record)
    }
}
