//! Command line and dialog front-ends. Both resolve one target, then feed the sinks.

pub mod boundary;
pub mod cli;
pub mod dialog;
pub mod report;

use std::process::ExitCode;

pub const NO_DATA_MESSAGE: &str = "Could not retrieve geolocation data.";

/// Process exit status of the `ipgeo` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    NoData = 1,
    Failure = 2,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}
