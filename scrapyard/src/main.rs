use std::{path::PathBuf, process::ExitCode};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use scrapyard_store::{error::StoreError, yard::Yard};
use thiserror::Error;
use tracing::debug;

use crate::settings::Settings;

mod command;
mod kind;
mod output;
mod settings;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Initialization error")]
    Initialization,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Ok(logpath) = get_logging_path() {
        let logfile = tracing_appender::rolling::daily(logpath, "log");
        tracing_subscriber::fmt()
            .compact()
            .with_writer(logfile)
            .init();
    }

    debug!("starting application");

    let matches = cli().get_matches();

    let mut settings = Settings::default();
    map_args_to_settings(&matches, &mut settings);

    let yard = match resolve_yard(&settings) {
        Ok(yard) => yard,
        Err(error) => {
            output::fail_with_cause(&error);
            return ExitCode::FAILURE;
        }
    };

    let code = match matches.subcommand() {
        Some(("put", args)) => command::put(&yard, args).await,
        Some(("list", _)) => command::list(&yard).await,
        Some(("show", args)) => command::show(&yard, args).await,
        Some(("restore", args)) => command::restore(&yard, args).await,
        Some(("purge", args)) => command::purge(&yard, args).await,
        Some(("empty", args)) => command::empty(&yard, args).await,
        _ => ExitCode::FAILURE,
    };

    debug!("closing application");

    code
}

fn cli() -> Command {
    Command::new("scrapyard")
        .about("scrapyard - a soft delete trash can with restore and purge")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .args([Arg::new("yard")
            .long("yard")
            .action(ArgAction::Set)
            .value_parser(value_parser!(PathBuf))
            .global(true)
            .help("hold trashed entries in this directory instead of ~/.scrapyard")])
        .subcommands([
            Command::new("put").about("move paths into the yard").arg(
                Arg::new("path")
                    .action(ArgAction::Append)
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("paths to stash away"),
            ),
            Command::new("list").about("list trashed entries oldest first"),
            Command::new("show")
                .about("print details for one trashed entry")
                .arg(
                    Arg::new("name")
                        .action(ArgAction::Set)
                        .required(true)
                        .help("trashed name as printed by list"),
                ),
            Command::new("restore")
                .about("move trashed entries back to their origin")
                .arg(
                    Arg::new("name")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("trashed names as printed by list"),
                ),
            Command::new("purge")
                .about("delete trashed entries for good")
                .arg(
                    Arg::new("name")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("trashed names as printed by list"),
                ),
            Command::new("empty")
                .about("delete every trashed entry for good")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("skip the confirmation prompt"),
                ),
        ])
}

fn map_args_to_settings(args: &ArgMatches, settings: &mut Settings) {
    settings.yard = args.get_one("yard").cloned();
}

fn resolve_yard(settings: &Settings) -> Result<Yard, StoreError> {
    match &settings.yard {
        Some(root) => Ok(Yard::at(root)),
        None => Yard::resolve(),
    }
}

fn get_logging_path() -> Result<String, Error> {
    let cache_dir = match dirs::cache_dir() {
        Some(cache_dir) => match cache_dir.to_str() {
            Some(cache_dir_string) => cache_dir_string.to_string(),
            None => return Err(Error::Initialization),
        },
        None => return Err(Error::Initialization),
    };

    Ok(format!("{}{}", cache_dir, "/scrapyard/logs"))
}
