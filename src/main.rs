//! Coordinate parser CLI - entry point and exit handling.

mod cli;
mod compute;
mod data;
mod error;
mod logging;
mod output;
#[cfg(feature = "parquet")]
mod parquet;
mod table_format;

use data::Command;
use error::CliError;
use tracing::debug;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match cli::parse_cli(args) {
        Ok((source, command, params)) => {
            logging::init(params.verbose);
            debug!(?source, ?command, format = %params.output.format, "starting");

            let start = if params.perf {
                Some(std::time::Instant::now())
            } else {
                None
            };

            let flush_each = source.uses_stdin();
            let inputs = match data::expand_data_source(source) {
                Ok(inputs) => inputs,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(1);
                }
            };

            let records = compute::parse_stream(inputs, command, &params);

            let summary = match output::dispatch_output(records, command, &params, flush_each) {
                Ok(summary) => summary,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(1);
                }
            };

            if let Some(start_time) = start {
                let elapsed = start_time.elapsed();
                eprintln!(
                    "Processed {} records in {:.3}s ({:.0} records/sec)",
                    summary.records,
                    elapsed.as_secs_f64(),
                    summary.records as f64 / elapsed.as_secs_f64()
                );
            }

            if command == Command::Validate && summary.invalid > 0 {
                std::process::exit(1);
            }
        }
        Err(CliError::Exit(message)) => {
            println!("{}", message);
            std::process::exit(0);
        }
        Err(CliError::Message(message)) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}
