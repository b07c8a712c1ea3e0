pub use error::ProviderError;
pub use fetcher::HttpFetcher;
pub use ip_api::IpApi;
pub use ipinfo::IpInfo;

mod error;
mod fetcher;
pub mod ip_api;
pub mod ipinfo;

use crate::record::GeoRecord;
use crate::target::Target;

/// Upstream geolocation service.
pub trait GeoProvider {
    fn name(&self) -> &'static str;

    fn lookup(&self, target: &Target) -> Result<GeoRecord, ProviderError>;
}

impl<P: GeoProvider + ?Sized> GeoProvider for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn lookup(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        (**self).lookup(target)
    }
}

impl<P: GeoProvider + ?Sized> GeoProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn lookup(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        (**self).lookup(target)
    }
}
