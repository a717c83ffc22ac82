//! CLI entrypoint for `yamleo`.

use std::io;

use clap::Parser;
use clap::error::ErrorKind;

use yamleo_cli::cli::Cli;
use yamleo_cli::config::{Overrides, load_settings};
use yamleo_cli::error::Result;
use yamleo_cli::{commands, logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = parse_command_line()?;
    logging::init(cli.verbose)?;
    let settings = load_settings(cli.config.as_deref(), &Overrides::from_cli(&cli))?;
    let mut stdout = io::stdout().lock();
    commands::run(&cli.command, &settings, &mut stdout)
}

fn parse_command_line() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) => {
            if is_display_request(&err) {
                err.exit();
            }
            Err(err.into())
        }
    }
}

fn is_display_request(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}
