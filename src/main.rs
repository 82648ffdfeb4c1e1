#[macro_use]
extern crate log;

mod cli;
mod logging;

use std::process::exit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use burrowstat::{Accumulator, BurrowCollector, Fields, GatherError, Tags};

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity_level());
    trace!("Created:\n{:#?}", cli);

    let collector = match BurrowCollector::new(cli.to_config()) {
        Ok(collector) => collector,
        Err(e) => {
            error!("Invalid configuration: {e}");
            exit(exit_code::FAILURE);
        },
    };

    let shutdown = build_shutdown_token();
    let printer = Arc::new(LinePrinter::default());

    loop {
        collector.gather(printer.clone(), shutdown.clone()).await;

        if cli.interval == 0 || shutdown.is_cancelled() {
            break;
        }
        tokio::select! {
            _ = sleep(Duration::from_secs(cli.interval)) => {},
            _ = shutdown.cancelled() => break,
        }
    }

    if printer.had_errors() {
        exit(exit_code::FAILURE);
    }
    exit(exit_code::SUCCESS);
}

fn build_shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();

    // NOTE: The handler will be listening on its own dedicated thread.
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Shutting down...");
        handler_token.cancel();
    }) {
        error!("Failed to register signal handler: {e}");
    }

    token
}

/// Prints every record as an InfluxDB-style line on stdout; errors go to
/// the log and into the process exit status.
#[derive(Default)]
struct LinePrinter {
    errors: AtomicUsize,
}

impl LinePrinter {
    fn had_errors(&self) -> bool {
        self.errors.load(Ordering::Relaxed) > 0
    }
}

impl Accumulator for LinePrinter {
    fn add_fields(&self, measurement: &str, fields: Fields, tags: Tags) {
        let tags = tags
            .iter()
            .map(|(k, v)| format!(",{k}={v}"))
            .collect::<String>();
        let fields = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}i"))
            .collect::<Vec<String>>()
            .join(",");

        println!(
            "{measurement}{tags} {fields} {}",
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
    }

    fn add_error(&self, error: GatherError) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        error!("{error}");
    }
}
