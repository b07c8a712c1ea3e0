use serde::{Serialize, Serializer};
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LocationError {
    #[error(r#"location must be in format "LATITUDE,LONGITUDE""#)]
    Parts,
    #[error("coordinate has wrong format: {0}")]
    Coordinate(#[from] ParseFloatError),
    #[error("latitude {0} is out of range")]
    LatitudeRange(f64),
    #[error("longitude {0} is out of range")]
    LongitudeRange(f64),
}

/// Point on the globe in decimal degrees.
///
/// A location parsed from text displays as that text, one built from numbers
/// displays both coordinates with [`f64`] debug formatting.
#[derive(Debug, Clone)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    text: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            text: None,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = s.split_once(',').ok_or(LocationError::Parts)?;
        if longitude.contains(',') {
            return Err(LocationError::Parts);
        }
        let location = Self::new(latitude.parse()?, longitude.parse()?)?;
        Ok(Self {
            text: Some(s.to_owned()),
            ..location
        })
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

// Debug formatting of f64 keeps the fractional part of integral values: "10.0", not "10"
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "{:?},{:?}", self.latitude, self.longitude),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized lookup result, the same shape whichever provider answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoRecord {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub org: Option<String>,
    pub timezone: Option<String>,
    pub loc: Option<Location>,
}

impl GeoRecord {
    /// Marker popup label, absent parts are left empty.
    pub fn place_label(&self) -> String {
        [&self.city, &self.region, &self.country]
            .map(|part| part.as_deref().unwrap_or(""))
            .join(", ")
    }
}
