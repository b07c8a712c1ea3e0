use std::fmt;
use std::net::IpAddr;

/// Command line token meaning "my own address".
pub const SELF_LOOKUP_TOKEN: &str = "json";

/// What to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The caller's own public address, as seen by the provider.
    SelfLookup,
    Address(String),
}

impl Target {
    /// Interpret user input. Empty input and [`SELF_LOOKUP_TOKEN`] mean a self-lookup,
    /// IP addresses are brought to their canonical form, anything else is kept as-is.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input == SELF_LOOKUP_TOKEN {
            return Self::SelfLookup;
        }
        match input.parse::<IpAddr>() {
            Ok(ip) => Self::Address(ip.to_canonical().to_string()),
            Err(_) => Self::Address(input.to_owned()),
        }
    }

    /// Path segment to substitute into provider URI templates, empty for a self-lookup.
    pub fn as_path_segment(&self) -> &str {
        match self {
            Self::SelfLookup => "",
            Self::Address(address) => address,
        }
    }
}

impl From<Option<&str>> for Target {
    fn from(input: Option<&str>) -> Self {
        input.map_or(Self::SelfLookup, Self::parse)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLookup => f.write_str("own address"),
            Self::Address(address) => f.write_str(address),
        }
    }
}
