//! Primary provider, [ipinfo.io](https://ipinfo.io).
//!
//! Its payload already has the canonical field names. Reserved and private
//! addresses are answered with a `"bogon": true` object, which is not a usable result.

use super::{GeoProvider, HttpFetcher, ProviderError};
use crate::record::{GeoRecord, Location};
use crate::target::Target;
use crate::uri_tools::UriTemplate;

use hyper::http::uri::Uri;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::rc::Rc;

pub const NAME: &str = "ipinfo.io";
pub const DEFAULT_URI_TEMPLATE: &str = "https://ipinfo.io/{target}/json";
pub const DEFAULT_SELF_URI: &str = "https://ipinfo.io/json";

const BOGON_KEY: &str = "bogon";

#[derive(Deserialize)]
struct IpInfoPayload {
    ip: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    org: Option<String>,
    timezone: Option<String>,
    loc: Option<String>,
}

impl From<IpInfoPayload> for GeoRecord {
    fn from(payload: IpInfoPayload) -> Self {
        let loc = payload.loc.and_then(|loc| match loc.parse::<Location>() {
            Ok(location) => Some(location),
            Err(error) => {
                log::debug!(r#"{NAME}: dropping location "{loc}": {error}"#);
                None
            }
        });
        Self {
            ip: payload.ip,
            city: payload.city,
            region: payload.region,
            country: payload.country,
            org: payload.org,
            timezone: payload.timezone,
            loc,
        }
    }
}

/// Decode an ipinfo.io response body. An empty object or one with a `bogon` key is no result.
pub fn parse_response(body: &[u8]) -> Result<GeoRecord, ProviderError> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    if object.is_empty() {
        return Err(ProviderError::Rejected("empty response".into()));
    }
    if object.contains_key(BOGON_KEY) {
        return Err(ProviderError::Rejected("bogon address".into()));
    }
    let payload: IpInfoPayload = serde_json::from_value(Value::Object(object))?;
    Ok(payload.into())
}

pub struct IpInfo {
    fetcher: Rc<HttpFetcher>,
    uri_template: UriTemplate,
    self_uri: Uri,
}

impl IpInfo {
    pub fn new(fetcher: Rc<HttpFetcher>, uri_template: UriTemplate, self_uri: Uri) -> Self {
        Self {
            fetcher,
            uri_template,
            self_uri,
        }
    }

    fn uri(&self, target: &Target) -> Result<Uri, ProviderError> {
        match target {
            Target::SelfLookup => Ok(self.self_uri.clone()),
            Target::Address(address) => Ok(self.uri_template.compose(address)?),
        }
    }
}

impl GeoProvider for IpInfo {
    fn name(&self) -> &'static str {
        NAME
    }

    fn lookup(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        let body = self.fetcher.get(self.uri(target)?)?;
        parse_response(&body)
    }
}
