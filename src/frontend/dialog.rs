use super::{report, NO_DATA_MESSAGE};
use crate::provider::GeoProvider;
use crate::resolver::Resolver;
use crate::sink::{CsvLogSink, MapSink, Sink};
use crate::target::Target;

use std::io::{self, BufRead, Write};

pub const TITLE: &str = "IP Geolocation Tracker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

/// Modal question / alert surface.
pub trait Prompt {
    /// `None` means the user cancelled.
    fn ask(&mut self, title: &str, message: &str) -> io::Result<Option<String>>;

    fn alert(&mut self, level: AlertLevel, title: &str, message: &str) -> io::Result<()>;
}

/// [`Prompt`] over a terminal, end of input counts as cancel.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R, W> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, title: &str, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "[{title}] {message} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn alert(&mut self, level: AlertLevel, title: &str, message: &str) -> io::Result<()> {
        let marker = match level {
            AlertLevel::Info => "i",
            AlertLevel::Error => "!",
        };
        writeln!(self.output, "\n({marker}) {title}\n{message}")?;
        self.output.flush()
    }
}

/// Ask for one address, resolve it, save both map and log, show the outcome.
pub fn run<A, B, P>(
    resolver: &Resolver<A, B>,
    map: &MapSink,
    csv: &CsvLogSink,
    prompt: &mut P,
) -> anyhow::Result<()>
where
    A: GeoProvider,
    B: GeoProvider,
    P: Prompt,
{
    let Some(input) = prompt.ask(TITLE, "Enter an IP address:")? else {
        log::info!("dialog cancelled");
        return Ok(());
    };
    let target = Target::parse(&input);

    let Some(record) = resolver.resolve(&target).into_record() else {
        prompt.alert(AlertLevel::Error, "Error", NO_DATA_MESSAGE)?;
        return Ok(());
    };

    let map_line = if map.write(&record) {
        format!("Map saved to {}", map.path().display())
    } else {
        "Map could not be created.".to_owned()
    };
    let csv_line = if csv.write(&record) {
        format!("CSV log updated ({})", csv.path().display())
    } else {
        "CSV log could not be updated.".to_owned()
    };
    let message = format!("{}\n{map_line}\n{csv_line}", report::details(&record));
    prompt.alert(AlertLevel::Info, "Geolocation Result", &message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::record::{GeoRecord, Location};

    struct Fixed(Option<GeoRecord>);

    impl GeoProvider for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn lookup(&self, _target: &Target) -> Result<GeoRecord, ProviderError> {
            self.0
                .clone()
                .ok_or_else(|| ProviderError::Rejected("nothing".into()))
        }
    }

    fn found() -> GeoRecord {
        GeoRecord {
            ip: Some("8.8.8.8".into()),
            city: Some("Mountain View".into()),
            loc: Some(Location::new(37.4056, -122.0775).unwrap()),
            ..Default::default()
        }
    }

    fn sinks(dir: &tempfile::TempDir) -> (MapSink, CsvLogSink) {
        (
            MapSink::new(dir.path().join("ip_location.html"), 8),
            CsvLogSink::new(dir.path().join("ip_log.csv")),
        )
    }

    #[test]
    fn terminal_prompt_reads_line() {
        let mut output = vec![];
        let mut prompt = TerminalPrompt::new(&b"8.8.8.8\n"[..], &mut output);
        let answer = prompt.ask(TITLE, "Enter an IP address:").unwrap();
        assert_eq!(answer.as_deref(), Some("8.8.8.8\n"));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "[IP Geolocation Tracker] Enter an IP address: "
        );
    }

    #[test]
    fn terminal_prompt_eof_is_cancel() {
        let mut prompt = TerminalPrompt::new(&b""[..], vec![]);
        assert_eq!(prompt.ask(TITLE, "?").unwrap(), None);
    }

    #[test]
    fn found_saves_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let (map, csv) = sinks(&dir);
        let resolver = Resolver::new(Fixed(Some(found())), Fixed(None));
        let mut output = vec![];
        let mut prompt = TerminalPrompt::new(&b"\n"[..], &mut output);

        run(&resolver, &map, &csv, &mut prompt).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("(i) Geolocation Result"));
        assert!(output.contains("City       : Mountain View"));
        assert!(output.contains("Map saved to"));
        assert!(output.contains("CSV log updated"));
        assert!(map.path().exists());
        assert!(csv.path().exists());
    }

    #[test]
    fn not_found_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let (map, csv) = sinks(&dir);
        let resolver = Resolver::new(Fixed(None), Fixed(None));
        let mut output = vec![];
        let mut prompt = TerminalPrompt::new(&b"8.8.8.8\n"[..], &mut output);

        run(&resolver, &map, &csv, &mut prompt).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("(!) Error\nCould not retrieve geolocation data."));
        assert!(!map.path().exists());
        assert!(!csv.path().exists());
    }

    #[test]
    fn cancel_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (map, csv) = sinks(&dir);
        let resolver = Resolver::new(Fixed(Some(found())), Fixed(None));
        let mut prompt = TerminalPrompt::new(&b""[..], vec![]);

        run(&resolver, &map, &csv, &mut prompt).unwrap();

        assert!(!csv.path().exists());
    }
}
