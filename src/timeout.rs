use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 8;

#[derive(Error, Debug, PartialEq)]
#[error("request timeout must be a positive finite number of seconds, got {0}")]
pub struct TimeoutError(f64);

/// Upper bound for a single provider request, connect to last body byte.
///
/// Deserialized from a number of seconds, fractions are allowed: `timeout = 2.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "f64")]
pub struct RequestTimeout(Duration);

impl RequestTimeout {
    pub fn new(duration: Duration) -> Option<Self> {
        if duration.is_zero() {
            None
        } else {
            Some(Self(duration))
        }
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS))
    }
}

impl TryFrom<f64> for RequestTimeout {
    type Error = TimeoutError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(TimeoutError(secs));
        }
        Duration::try_from_secs_f64(secs)
            .ok()
            .and_then(Self::new)
            .ok_or(TimeoutError(secs))
    }
}

impl From<RequestTimeout> for Duration {
    fn from(timeout: RequestTimeout) -> Self {
        timeout.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_eight_seconds() {
        assert_eq!(RequestTimeout::default().duration(), Duration::from_secs(8));
    }

    #[test]
    fn from_fractional_seconds() {
        let timeout = RequestTimeout::try_from(0.25).unwrap();
        assert_eq!(Duration::from(timeout), Duration::from_millis(250));
    }

    #[test]
    fn rejects_non_positive() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(RequestTimeout::try_from(secs).is_err(), "{secs}");
        }
        assert_eq!(RequestTimeout::new(Duration::ZERO), None);
    }
}
