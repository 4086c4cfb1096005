//! Runs the parser over a stream of inputs.

use crate::data::{self, Command, InputRecord, InputStream, Parameters};
use coordparse::CoordinateReading;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ParseRecord {
    pub input: InputRecord,
    pub outcome: Result<CoordinateReading, String>,
}

impl ParseRecord {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub type RecordResult = Result<ParseRecord, String>;
pub type RecordStream = Box<dyn Iterator<Item = RecordResult>>;

pub fn parse_input(input: InputRecord, strict: bool) -> ParseRecord {
    let outcome = coordparse::parse_detailed(&input.text)
        .map_err(|err| err.reason().to_string())
        .and_then(|reading| {
            if strict {
                data::validate_bounds(&reading.coordinate)?;
            }
            Ok(reading)
        });

    ParseRecord { input, outcome }
}

/// For `parse`, an invalid input ends the stream with an error unless
/// invalid inputs are skipped. `validate` passes every outcome through.
/// Nothing is read after an error.
pub fn parse_stream(
    mut inputs: InputStream,
    command: Command,
    params: &Parameters,
) -> RecordStream {
    let strict = params.strict;
    let skip_invalid = params.skip_invalid;

    let mut failed = false;

    let iter = std::iter::from_fn(move || {
        while !failed {
            let input = match inputs.next()? {
                Ok(input) => input,
                Err(err) => {
                    failed = true;
                    return Some(Err(err));
                }
            };

            let record = parse_input(input, strict);
            if command == Command::Validate {
                return Some(Ok(record));
            }

            let ParseRecord { input, outcome } = record;
            match outcome {
                Ok(reading) => {
                    return Some(Ok(ParseRecord {
                        input,
                        outcome: Ok(reading),
                    }));
                }
                Err(reason) if skip_invalid => {
                    warn!(
                        input = %input.text,
                        origin = input.origin.as_deref().unwrap_or("argument"),
                        %reason,
                        "skipping invalid coordinate"
                    );
                }
                Err(reason) => {
                    debug!(input = %input.text, %reason, "rejected coordinate");
                    failed = true;
                    return Some(Err(describe_failure(&input, &reason)));
                }
            }
        }
        None
    });

    Box::new(iter)
}

fn describe_failure(input: &InputRecord, reason: &str) -> String {
    match &input.origin {
        Some(origin) => format!("{}: {}: '{}'", origin, reason, input.text),
        None => format!("{}: '{}'", reason, input.text),
    }
}
