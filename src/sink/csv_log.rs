use super::{Sink, SinkError};
use crate::config::CsvConfig;
use crate::record::GeoRecord;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{Terminator, WriterBuilder};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 8] = [
    "timestamp",
    "ip",
    "city",
    "region",
    "country",
    "org",
    "timezone",
    "loc",
];

/// Appends one row per lookup, the header goes in only while the file is empty.
pub struct CsvLogSink {
    path: PathBuf,
}

impl CsvLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &CsvConfig) -> Self {
        Self::new(&config.path)
    }

    pub fn append_at(&self, record: &GeoRecord, timestamp: DateTime<Utc>) -> Result<(), SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_empty = file.metadata()?.len() == 0;
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        if is_empty {
            writer.write_record(HEADER)?;
        }
        writer.write_record(row(record, timestamp))?;
        writer.flush()?;
        Ok(())
    }
}

fn row(record: &GeoRecord, timestamp: DateTime<Utc>) -> [String; 8] {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        field(&record.ip),
        field(&record.city),
        field(&record.region),
        field(&record.country),
        field(&record.org),
        field(&record.timezone),
        record.loc.as_ref().map(|loc| loc.to_string()).unwrap_or_default(),
    ]
}

impl Sink for CsvLogSink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn try_write(&self, record: &GeoRecord) -> Result<(), SinkError> {
        self.append_at(record, Utc::now())
    }
}
