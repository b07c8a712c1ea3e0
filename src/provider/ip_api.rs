//! Fallback provider, [ip-api.com](https://ip-api.com).
//!
//! The free endpoint is plain HTTP. An empty target asks for the caller's own address.

use super::{GeoProvider, HttpFetcher, ProviderError};
use crate::record::{GeoRecord, Location};
use crate::target::Target;
use crate::uri_tools::UriTemplate;

use serde::Deserialize;
use std::rc::Rc;

pub const NAME: &str = "ip-api.com";
pub const DEFAULT_URI_TEMPLATE: &str = "http://ip-api.com/json/{target}";

const SUCCESS_STATUS: &str = "success";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiPayload {
    status: Option<String>,
    message: Option<String>,
    query: Option<String>,
    city: Option<String>,
    region_name: Option<String>,
    country_code: Option<String>,
    isp: Option<String>,
    timezone: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpApiPayload {
    fn location(&self) -> Option<Location> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Location::new(lat, lon).ok(),
            _ => None,
        }
    }
}

impl From<IpApiPayload> for GeoRecord {
    fn from(payload: IpApiPayload) -> Self {
        let loc = payload.location();
        Self {
            ip: payload.query,
            city: payload.city,
            region: payload.region_name,
            country: payload.country_code,
            org: payload.isp,
            timezone: payload.timezone,
            loc,
        }
    }
}

/// Decode an ip-api.com response body, only `"status": "success"` is accepted.
pub fn parse_response(body: &[u8]) -> Result<GeoRecord, ProviderError> {
    let payload: IpApiPayload = serde_json::from_slice(body)?;
    if payload.status.as_deref() == Some(SUCCESS_STATUS) {
        return Ok(payload.into());
    }
    Err(ProviderError::Rejected(format!(
        "status {:?}, message {:?}",
        payload.status.as_deref().unwrap_or("-"),
        payload.message.as_deref().unwrap_or("-"),
    )))
}

pub struct IpApi {
    fetcher: Rc<HttpFetcher>,
    uri_template: UriTemplate,
}

impl IpApi {
    pub fn new(fetcher: Rc<HttpFetcher>, uri_template: UriTemplate) -> Self {
        Self {
            fetcher,
            uri_template,
        }
    }
}

impl GeoProvider for IpApi {
    fn name(&self) -> &'static str {
        NAME
    }

    fn lookup(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        let uri = self.uri_template.compose(target.as_path_segment())?;
        let body = self.fetcher.get(uri)?;
        parse_response(&body)
    }
}
