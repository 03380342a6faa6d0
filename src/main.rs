//! `loggingkit`: log stdin lines through the facade and print every record.
//!
//! ```text
//! stdin line → Logger::log(level, line) → container → subscription → stdout
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use loggingkit::observability::init_diagnostics;
use loggingkit::{
    bootstrap_from_config, bootstrap_from_config_file, ConfiguredSink, Level, LogRecord, Logger,
    LoggingConfig, Subscription,
};

#[derive(Debug, Parser)]
#[command(name = "loggingkit", version, about = "Log stdin lines through a bootstrapped logging system")]
struct Cli {
    /// TOML config describing threshold, metadata and sink.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level each line is logged at.
    #[arg(long, default_value = "info")]
    level: Level,

    /// Logger label.
    #[arg(long, default_value = "loggingkit.cli")]
    label: String,

    /// Print records as JSON instead of dumps.
    #[arg(long)]
    json: bool,
}

fn print_record(record: &LogRecord, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        print!("{}", record.dump());
    }
    Ok(())
}

/// Print each new record until shutdown, then drain what is queued.
async fn print_records(
    mut updates: Subscription<Option<LogRecord>>,
    json: bool,
    mut shutdown: broadcast::Receiver<()>,
) {
    let emit = |record: Option<LogRecord>| {
        if let Some(record) = record {
            if let Err(e) = print_record(&record, json) {
                tracing::error!(error = %e, "failed to encode record");
            }
        }
    };
    loop {
        tokio::select! {
            record = updates.recv() => match record {
                Some(record) => emit(record),
                None => break,
            },
            _ = shutdown.recv() => {
                updates.cancel();
                while let Some(record) = updates.try_next() {
                    emit(record);
                }
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_diagnostics("loggingkit=info", false);
    let cli = Cli::parse();

    let sink = match &cli.config {
        Some(path) => bootstrap_from_config_file(path)?,
        None => bootstrap_from_config(&LoggingConfig::default())?,
    };
    let (shutdown, _) = broadcast::channel(1);
    // Only the newest record is queued per write, never a copy of the whole sink.
    let updates = match &sink {
        ConfiguredSink::Memory(output) => {
            Some(output.subscribe_map(|records: &Vec<LogRecord>| records.last().cloned()))
        }
        ConfiguredSink::Latest(output) => Some(output.subscribe()),
        // The file sink writes (and optionally echoes) on its own.
        ConfiguredSink::File(_) => None,
    };
    let printer = updates.map(|updates| tokio::spawn(print_records(updates, cli.json, shutdown.subscribe())));

    let logger = Logger::new(cli.label.as_str());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count = 0usize;
    while let Some(line) = lines.next_line().await? {
        logger.log(cli.level, || line, None, loggingkit::location!());
        count += 1;
    }

    let _ = shutdown.send(());
    if let Some(printer) = printer {
        printer.await?;
    }
    if let ConfiguredSink::File(output) = &sink {
        let failures = output.read().write_failures();
        if failures > 0 {
            tracing::warn!(failures, path = %output.read().path().display(), "some records were not written");
        }
    }

    tracing::info!(lines = count, "Input exhausted");
    Ok(())
}
