use crate::DomainError;
use fancy_regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

pub const PUBLIC_DOMAIN_FORMAT: &str = r"^([a-z0-9]+(-[a-z0-9]+)*\.)+[a-z]{2,}$";

pub const EMPTY_QUERY_MESSAGE: &str =
    "query in the path /geolocation/ip/{query} is required to search for a location";

pub const INVALID_QUERY_MESSAGE: &str =
    "query in the path /geolocation/ip/{query} is not a valid IPv4, IPv6 or domain name";

static PUBLIC_DOMAIN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(PUBLIC_DOMAIN_FORMAT).ok());

pub fn is_ip_address(query: &str) -> bool {
    query.parse::<IpAddr>().is_ok()
}

pub fn is_public_domain(query: &str) -> bool {
    if query.len() > 253 {
        return false;
    }
    PUBLIC_DOMAIN
        .as_ref()
        .map(|re| re.is_match(query).unwrap_or(false))
        .unwrap_or(false)
}

/// Checks a raw lookup key and returns it trimmed.
///
/// Accepts IPv4, IPv6 and lower-case public domain names.
pub fn validate_query(raw: &str) -> Result<&str, DomainError> {
    let query = raw.trim();

    if query.is_empty() {
        return Err(DomainError::EmptyQuery(EMPTY_QUERY_MESSAGE.to_string()));
    }

    if is_ip_address(query) || is_public_domain(query) {
        Ok(query)
    } else {
        Err(DomainError::InvalidQuery(INVALID_QUERY_MESSAGE.to_string()))
    }
}
