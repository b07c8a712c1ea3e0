use crate::config::Config;
use crate::provider::{GeoProvider, HttpFetcher, IpApi, IpInfo};
use crate::record::GeoRecord;
use crate::target::Target;

use std::rc::Rc;

/// Outcome of a lookup. `NotFound` is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found {
        record: GeoRecord,
        provider: &'static str,
    },
    NotFound,
}

impl Lookup {
    pub fn record(&self) -> Option<&GeoRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    pub fn into_record(self) -> Option<GeoRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }
}

/// Asks the primary provider first and the fallback one only if the primary gave nothing.
pub struct Resolver<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> Resolver<A, B>
where
    A: GeoProvider,
    B: GeoProvider,
{
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }

    pub fn resolve(&self, target: &Target) -> Lookup {
        let providers: [&dyn GeoProvider; 2] = [&self.primary, &self.fallback];
        for provider in providers {
            match provider.lookup(target) {
                Ok(record) => {
                    log::info!("{target} resolved by {}", provider.name());
                    return Lookup::Found {
                        record,
                        provider: provider.name(),
                    };
                }
                Err(error) => log::info!("{} failed for {target}: {error}", provider.name()),
            }
        }
        log::info!("no provider could resolve {target}");
        Lookup::NotFound
    }
}

pub type DefaultResolver = Resolver<IpInfo, IpApi>;

impl DefaultResolver {
    /// ipinfo.io backed by ip-api.com, sharing one HTTP client.
    pub fn from_config(config: &Config) -> std::io::Result<Self> {
        let fetcher = Rc::new(HttpFetcher::new(config.timeout)?);
        let primary = IpInfo::new(
            Rc::clone(&fetcher),
            config.ipinfo.uri_template.clone(),
            config.ipinfo.self_uri.clone(),
        );
        let fallback = IpApi::new(fetcher, config.ip_api.uri_template.clone());
        Ok(Self::new(primary, fallback))
    }
}
