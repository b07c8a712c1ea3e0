pub use csv_log::CsvLogSink;
pub use map::MapSink;

mod csv_log;
mod map;

use crate::record::GeoRecord;

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("record has no coordinates")]
    NoLocation,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Consumer of a lookup result that leaves a file behind.
pub trait Sink {
    fn path(&self) -> &Path;

    fn try_write(&self, record: &GeoRecord) -> Result<(), SinkError>;

    /// Write the record, reporting failure as `false` instead of an error.
    fn write(&self, record: &GeoRecord) -> bool {
        match self.try_write(record) {
            Ok(()) => {
                log::info!("{} written", self.path().display());
                true
            }
            Err(error) => {
                log::info!("cannot write {}: {error}", self.path().display());
                false
            }
        }
    }
}
