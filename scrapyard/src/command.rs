use std::{path::PathBuf, process::ExitCode};

use clap::ArgMatches;
use scrapyard_store::{
    purge::{purge as purge_record, purge_all},
    restore::restore as restore_record,
    scan, stash,
    yard::Yard,
};
use tracing::error;

use crate::{kind, output};

pub async fn put(yard: &Yard, args: &ArgMatches) -> ExitCode {
    let paths: Vec<PathBuf> = match args.get_many::<PathBuf>("path") {
        Some(paths) => paths.cloned().collect(),
        None => return ExitCode::FAILURE,
    };

    let mut failed = false;
    for path in paths {
        match stash::stash(yard, &path).await {
            Ok(trashed_name) => {
                println!("stashed {} as {}", output::display_path(&path), trashed_name);
            }
            Err(error) => {
                error!("stashing {:?} failed: {:?}", path, error);

                output::fail_with_cause(&error);
                failed = true;
            }
        }
    }

    exit_code(failed)
}

pub async fn list(yard: &Yard) -> ExitCode {
    let snapshot = scan::snapshot(yard).await;
    if !snapshot.complete {
        output::fail("the listing may be incomplete, see the logs");
    }

    if snapshot.records.is_empty() {
        println!("the yard is empty");
        return exit_code(!snapshot.complete);
    }

    let name_width = snapshot
        .records
        .iter()
        .map(|record| record.trashed_name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    println!(
        "{:<name_width$}  {:<12}  {:>10}  {:<16}  {}",
        "NAME", "KIND", "SIZE", "MODIFIED", "ORIGIN"
    );

    for record in &snapshot.records {
        let file_kind = kind::classify(record.original_name(), record.is_directory);
        let size = if record.is_directory {
            "-".to_string()
        } else {
            output::format_size(record.size)
        };
        let origin = match &record.origin {
            Some(origin) => output::display_path(origin),
            None => "unknown".to_string(),
        };

        println!(
            "{:<name_width$}  {:<12}  {:>10}  {:<16}  {}",
            record.trashed_name,
            file_kind.label(),
            size,
            output::format_time(record.modified),
            origin
        );
    }

    exit_code(!snapshot.complete)
}

pub async fn show(yard: &Yard, args: &ArgMatches) -> ExitCode {
    let name = match args.get_one::<String>("name") {
        Some(name) => name,
        None => return ExitCode::FAILURE,
    };

    let snapshot = scan::snapshot(yard).await;
    let record = match snapshot.find(name) {
        Some(record) => record,
        None => {
            output::fail(&format!("no entry named {} in the yard", name));
            return ExitCode::FAILURE;
        }
    };

    let file_kind = kind::classify(record.original_name(), record.is_directory);
    let size = if record.is_directory {
        "-".to_string()
    } else {
        output::format_size(record.size)
    };
    let origin = match &record.origin {
        Some(origin) => output::display_path(origin),
        None => "unknown".to_string(),
    };

    println!("Name:      {}", record.original_name());
    println!("Kind:      {}", file_kind.label());
    println!("Size:      {}", size);
    println!("Modified:  {}", output::format_time(record.modified));
    println!("Origin:    {}", origin);
    println!("Stashed:   {}", output::display_path(&record.trashed_path));

    ExitCode::SUCCESS
}

pub async fn restore(yard: &Yard, args: &ArgMatches) -> ExitCode {
    let names = collect_names(args);
    let snapshot = scan::snapshot(yard).await;

    let mut failed = false;
    for name in names {
        let record = match snapshot.find(&name) {
            Some(record) => record,
            None => {
                output::fail(&format!("no entry named {} in the yard", name));
                failed = true;
                continue;
            }
        };

        match restore_record(yard, record).await {
            Ok(restored_to) => {
                if record.origin.as_deref() == Some(restored_to.as_path()) {
                    println!("restored {} to {}", name, output::display_path(&restored_to));
                } else {
                    println!(
                        "restored {} to {} (origin was occupied)",
                        name,
                        output::display_path(&restored_to)
                    );
                }
            }
            Err(error) => {
                error!("restoring {} failed: {:?}", name, error);

                output::fail_with_cause(&error);
                failed = true;
            }
        }
    }

    exit_code(failed)
}

pub async fn purge(yard: &Yard, args: &ArgMatches) -> ExitCode {
    let names = collect_names(args);
    let snapshot = scan::snapshot(yard).await;

    let mut failed = false;
    for name in names {
        let record = match snapshot.find(&name) {
            Some(record) => record,
            None => {
                output::fail(&format!("no entry named {} in the yard", name));
                failed = true;
                continue;
            }
        };

        match purge_record(yard, record).await {
            Ok(()) => println!("purged {}", name),
            Err(error) => {
                error!("purging {} failed: {:?}", name, error);

                output::fail_with_cause(&error);
                failed = true;
            }
        }
    }

    exit_code(failed)
}

pub async fn empty(yard: &Yard, args: &ArgMatches) -> ExitCode {
    let snapshot = scan::snapshot(yard).await;

    let count = snapshot.records.len();
    if count > 0 && !args.get_flag("yes") {
        let question = format!("permanently delete all {} entries?", count);
        if !output::confirm(&question) {
            println!("nothing deleted");
            return ExitCode::SUCCESS;
        }
    }

    match purge_all(yard).await {
        Ok(summary) => {
            println!("purged {} entries", summary.purged.len());

            if summary.failed.is_empty() {
                ExitCode::SUCCESS
            } else {
                for (name, error) in &summary.failed {
                    error!("purging {} failed: {:?}", name, error);

                    output::fail_with_cause(error);
                }

                ExitCode::FAILURE
            }
        }
        Err(error) => {
            error!("emptying the yard failed: {:?}", error);

            output::fail_with_cause(&error);
            ExitCode::FAILURE
        }
    }
}

fn collect_names(args: &ArgMatches) -> Vec<String> {
    match args.get_many::<String>("name") {
        Some(names) => names.cloned().collect(),
        None => Vec::new(),
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
