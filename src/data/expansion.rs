//! Turns a data source into a stream of raw coordinate strings.

use super::types::{DataSource, InputPath, InputRecord, InputStream};
use crate::error::InputError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::debug;

fn open_input(input_path: &InputPath) -> io::Result<Box<dyn BufRead>> {
    match input_path {
        InputPath::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
        InputPath::File(path) => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

pub fn expand_data_source(source: DataSource) -> Result<InputStream, InputError> {
    match source {
        DataSource::Single(text) => Ok(Box::new(std::iter::once(Ok(InputRecord {
            text,
            origin: None,
        })))),
        DataSource::File(input_path) => {
            let name = input_path.display_name();
            let reader = open_input(&input_path)
                .map_err(|e| InputError(format!("Error opening {}: {}", name, e)))?;
            debug!(source = %name, "reading coordinates");
            Ok(read_lines(reader, name))
        }
    }
}

/// One record per non-blank line; lines starting with `#` are comments.
pub fn read_lines<R: BufRead + 'static>(reader: R, name: String) -> InputStream {
    let mut lines = reader.lines().enumerate();

    let iter = std::iter::from_fn(move || {
        for (idx, line_result) in lines.by_ref() {
            let line_number = idx + 1;
            let line = match line_result {
                Ok(value) => value,
                Err(err) => {
                    return Some(Err(format!(
                        "{}:{}: failed to read line: {}",
                        name, line_number, err
                    )));
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Some(Ok(InputRecord {
                text: trimmed.to_string(),
                origin: Some(format!("{}:{}", name, line_number)),
            }));
        }
        None
    });

    Box::new(iter)
}
