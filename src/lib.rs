pub mod config;
pub mod frontend;
pub mod provider;
pub mod record;
pub mod resolver;
pub mod sink;
pub mod target;
pub mod timeout;
pub mod uri_tools;

pub use record::{GeoRecord, Location};
pub use resolver::{DefaultResolver, Lookup, Resolver};
pub use target::Target;
