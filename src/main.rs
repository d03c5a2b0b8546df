/// Service entry point: fetch one batch of observation documents, run the
/// cleaning pipeline, and print the cleaned preview plus per-column
/// summaries to the console.
///
/// Usage:
///   wxdash_service [config.toml]               # live fetch from the store
///   wxdash_service [config.toml] --replay FILE # replay a local JSON dump
///
/// The document-store URL comes from `[source] url` in the config file or
/// the `DOCSTORE_URL` environment variable (a `.env` file is honored).

use std::env;
use std::process;

use wxdash_service::analysis::aggregates;
use wxdash_service::config::Config;
use wxdash_service::ingest::{docstore, replay};
use wxdash_service::logging::{self, LogLevel, Stage};
use wxdash_service::model::{RawRecord, Table};
use wxdash_service::pipeline::{self, PipelineOutcome};

const PREVIEW_ROWS: usize = 5;

fn main() {
    dotenv::dotenv().ok();
    logging::init_logger(LogLevel::Info, None, false);

    let args: Vec<String> = env::args().skip(1).collect();
    let (config_path, replay_path) = parse_args(&args);

    let config = match config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                logging::error(Stage::System, &format!("cannot load {}: {}", path, e));
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let records = match fetch(&config, replay_path) {
        Ok(records) => records,
        Err(e) => {
            logging::error(Stage::Ingest, &e.to_string());
            process::exit(1);
        }
    };
    logging::info(
        Stage::Ingest,
        &format!("fetched {} raw records", records.len()),
    );

    match pipeline::run(&records, &config) {
        Ok(PipelineOutcome::Table(table)) => report(&table, &config),
        Ok(PipelineOutcome::Empty) => {
            println!("No data for this selection.");
        }
        Err(e) => {
            logging::error(Stage::Normalize, &e.to_string());
            process::exit(1);
        }
    }
}

/// `[config.toml] [--replay FILE]` in either order.
fn parse_args(args: &[String]) -> (Option<&str>, Option<&str>) {
    let mut config_path = None;
    let mut replay_path = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--replay" {
            replay_path = args.get(i + 1).map(String::as_str);
            i += 2;
        } else {
            config_path = Some(args[i].as_str());
            i += 1;
        }
    }
    (config_path, replay_path)
}

fn fetch(
    config: &Config,
    replay_path: Option<&str>,
) -> Result<Vec<RawRecord>, Box<dyn std::error::Error>> {
    if let Some(path) = replay_path {
        logging::info(Stage::Ingest, &format!("replaying records from {}", path));
        return Ok(replay::load_records(path)?);
    }

    let url = config
        .source
        .url
        .clone()
        .or_else(|| env::var("DOCSTORE_URL").ok())
        .ok_or("no document store URL: set [source] url or DOCSTORE_URL")?;

    let client = reqwest::blocking::Client::new();
    Ok(docstore::fetch_records(
        &client,
        &url,
        &config.source.collection,
    )?)
}

/// Console rendering of the cleaned table: preview rows, then smoothed
/// series extents and daily means per tracked column.
fn report(table: &Table, config: &Config) {
    println!("Cleaned data: {} rows, {} columns", table.len(), table.columns.len());

    println!("\nPreview (first {} rows):", PREVIEW_ROWS);
    println!("  timestamp | {}", table.columns.join(" | "));
    for row in table.preview(PREVIEW_ROWS) {
        let cells: Vec<String> = row.cells.iter().map(|c| c.to_string()).collect();
        println!("  {} | {}", row.timestamp.to_rfc3339(), cells.join(" | "));
    }

    for name in config.numeric_column_names() {
        let smoothed = format!("{}{}", name, wxdash_service::smooth::SMOOTH_SUFFIX);
        let points = aggregates::series(table, &smoothed);
        match (points.first(), points.last()) {
            (Some((_, first)), Some((_, last))) => {
                println!(
                    "\n{}: {} smoothed points, {:.2} → {:.2}",
                    name,
                    points.len(),
                    first,
                    last
                );
            }
            _ => {
                println!("\n{}: no valid values after cleaning", name);
                continue;
            }
        }

        for (date, mean) in aggregates::daily_mean(table, &name) {
            println!("  {}  mean {:.2}", date, mean);
        }
    }
}
