use ipgeo::config::Config;
use ipgeo::frontend::boundary::guard;
use ipgeo::frontend::cli::{self, Cli};
use ipgeo::frontend::dialog::{self, TerminalPrompt};
use ipgeo::frontend::Exit;
use ipgeo::sink::{CsvLogSink, MapSink};
use ipgeo::DefaultResolver;

use clap::Parser;
use std::process::ExitCode;

fn dialog_main(config: &Config, resolver: &DefaultResolver) -> Exit {
    let map = MapSink::from_config(&config.map);
    let csv = CsvLogSink::from_config(&config.csv);
    let completed = guard(&config.error_log, || {
        dialog::run(resolver, &map, &csv, &mut TerminalPrompt::stdio())
    });
    if completed {
        Exit::Success
    } else {
        Exit::Failure
    }
}

fn try_main(args: Cli) -> anyhow::Result<Exit> {
    let config = args.load_config()?;

    simple_logger::init_with_level(args.log_level.unwrap_or(config.log_level))?;

    let resolver = DefaultResolver::from_config(&config)?;

    if args.dialog {
        return Ok(dialog_main(&config, &resolver));
    }

    let options = args.options(&config);
    let exit = cli::run(
        &resolver,
        &args.target(),
        &options,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    Ok(exit)
}

fn main() -> ExitCode {
    match try_main(Cli::parse()) {
        Ok(exit) => exit.into(),
        Err(error) => {
            eprintln!("Error: {error:#}");
            Exit::Failure.into()
        }
    }
}
