use super::{report, Exit, NO_DATA_MESSAGE};
use crate::config::{parse_config, Config, DEFAULT_CONFIG_PATH};
use crate::provider::GeoProvider;
use crate::record::GeoRecord;
use crate::resolver::Resolver;
use crate::sink::{CsvLogSink, MapSink, Sink};
use crate::target::{Target, SELF_LOOKUP_TOKEN};

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Look up where an IP address is, optionally saving a map and a CSV log row
#[derive(Parser, Debug)]
#[command(name = "ipgeo")]
#[command(version)]
#[command(about = "IP geolocation lookup with provider fallback", long_about = None)]
pub struct Cli {
    /// IP address to look up, empty or "json" for your own public address
    #[arg(long, short = 'i', default_value = SELF_LOOKUP_TOKEN)]
    pub ip: String,

    /// Save an interactive map (ip_location.html by default)
    #[arg(long, short = 'm')]
    pub map: bool,

    /// Append the result to a CSV log (ip_log.csv by default)
    #[arg(long, short = 'c')]
    pub csv: bool,

    /// Print the record as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// TOML configuration, ipgeo.toml is used if present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ask for the address interactively, always saving both map and log
    #[arg(long, conflicts_with_all = ["ip", "map", "csv", "json"])]
    pub dialog: bool,

    /// Override the configured log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<log::Level>,
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => parse_config(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => parse_config(DEFAULT_CONFIG_PATH),
            None => Ok(Config::default()),
        }
    }

    pub fn target(&self) -> Target {
        Target::parse(&self.ip)
    }

    pub fn options(&self, config: &Config) -> LookupOptions {
        LookupOptions {
            json: self.json,
            map: self.map.then(|| MapSink::from_config(&config.map)),
            csv: self.csv.then(|| CsvLogSink::from_config(&config.csv)),
        }
    }
}

/// What to do with a found record.
#[derive(Default)]
pub struct LookupOptions {
    pub json: bool,
    pub map: Option<MapSink>,
    pub csv: Option<CsvLogSink>,
}

fn print_record(record: &GeoRecord, json: bool, out: &mut impl Write) -> io::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(record)?)
    } else {
        write!(out, "\n{}", report::framed(record))
    }
}

/// Resolve `target` and report to `out`/`err`. Only I/O on those two streams can fail.
pub fn run<A, B>(
    resolver: &Resolver<A, B>,
    target: &Target,
    options: &LookupOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Exit>
where
    A: GeoProvider,
    B: GeoProvider,
{
    let record = match resolver.resolve(target).into_record() {
        Some(record) => record,
        None => {
            writeln!(
                err,
                "Error: {NO_DATA_MESSAGE} Try again later or check your network."
            )?;
            return Ok(Exit::NoData);
        }
    };

    print_record(&record, options.json, out)?;

    if let Some(map) = &options.map {
        if map.write(&record) {
            writeln!(out, "Map saved to {}", map.path().display())?;
        } else if record.loc.is_none() {
            writeln!(out, "Map could not be created (no coordinates).")?;
        } else {
            writeln!(out, "Map could not be saved to {}.", map.path().display())?;
        }
    }

    if let Some(csv) = &options.csv {
        if csv.write(&record) {
            writeln!(out, "Logged to {}", csv.path().display())?;
        } else {
            writeln!(out, "Could not save CSV log.")?;
        }
    }

    Ok(Exit::Success)
}
