//! Output formatting for text tables, CSV, JSON and Parquet.

use crate::compute::{ParseRecord, RecordStream};
use crate::data::{Command, OutputFormat, OutputOptions, Parameters};
use crate::error::OutputError;
use crate::table_format::{Column, TableFormatter};
use serde::Serialize;
use std::io::{self, BufWriter, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSummary {
    pub records: usize,
    pub invalid: usize,
}

impl OutputSummary {
    fn count(&mut self, record: &ParseRecord) {
        self.records += 1;
        if !record.is_valid() {
            self.invalid += 1;
        }
    }
}

pub trait Formatter {
    fn write(&mut self, records: RecordStream) -> Result<OutputSummary, OutputError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<&'a str>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude_format: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ValidateRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<&'a str>,
    pub valid: bool,
    pub error: Option<&'a str>,
}

pub fn parse_row<'a>(record: &'a ParseRecord, options: &OutputOptions) -> Option<ParseRow<'a>> {
    let reading = record.outcome.as_ref().ok()?;
    Some(ParseRow {
        input: options
            .should_show_inputs()
            .then_some(record.input.text.as_str()),
        latitude: reading.coordinate.latitude,
        longitude: reading.coordinate.longitude,
        latitude_format: options
            .show_formats
            .then(|| reading.latitude.format().short_name()),
        longitude_format: options
            .show_formats
            .then(|| reading.longitude.format().short_name()),
    })
}

pub fn validate_row<'a>(record: &'a ParseRecord, options: &OutputOptions) -> ValidateRow<'a> {
    ValidateRow {
        input: options
            .should_show_inputs()
            .then_some(record.input.text.as_str()),
        valid: record.is_valid(),
        error: record.outcome.as_ref().err().map(String::as_str),
    }
}

fn missing_reading() -> OutputError {
    OutputError::from("Unexpected invalid record in parse output")
}

pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_csv_parse<W: Write>(
    row: &ParseRow,
    precision: usize,
    headers: bool,
    first: bool,
    writer: &mut W,
) -> io::Result<()> {
    if first && headers {
        let mut names = Vec::new();
        if row.input.is_some() {
            names.push("input");
        }
        names.extend(["latitude", "longitude"]);
        if row.latitude_format.is_some() {
            names.extend(["latitudeFormat", "longitudeFormat"]);
        }
        writeln!(writer, "{}", names.join(","))?;
    }

    let mut fields = Vec::new();
    if let Some(input) = row.input {
        fields.push(csv_field(input));
    }
    fields.push(format!("{:.*}", precision, row.latitude));
    fields.push(format!("{:.*}", precision, row.longitude));
    if let (Some(lat_format), Some(lon_format)) = (row.latitude_format, row.longitude_format) {
        fields.push(lat_format.to_string());
        fields.push(lon_format.to_string());
    }
    writeln!(writer, "{}", fields.join(","))
}

fn write_csv_validate<W: Write>(
    row: &ValidateRow,
    headers: bool,
    first: bool,
    writer: &mut W,
) -> io::Result<()> {
    if first && headers {
        if row.input.is_some() {
            writeln!(writer, "input,valid,error")?;
        } else {
            writeln!(writer, "valid,error")?;
        }
    }

    if let Some(input) = row.input {
        write!(writer, "{},", csv_field(input))?;
    }
    writeln!(
        writer,
        "{},{}",
        row.valid,
        csv_field(row.error.unwrap_or_default())
    )
}

pub struct CsvFormatter<'a, W: Write> {
    writer: &'a mut W,
    options: &'a OutputOptions,
    command: Command,
    flush_each: bool,
}

impl<'a, W: Write> CsvFormatter<'a, W> {
    pub fn new(
        writer: &'a mut W,
        options: &'a OutputOptions,
        command: Command,
        flush_each: bool,
    ) -> Self {
        Self {
            writer,
            options,
            command,
            flush_each,
        }
    }
}

impl<'a, W: Write> Formatter for CsvFormatter<'a, W> {
    fn write(&mut self, records: RecordStream) -> Result<OutputSummary, OutputError> {
        let mut summary = OutputSummary::default();
        for (index, record_or_err) in records.enumerate() {
            let record = record_or_err?;
            let first = index == 0;
            match self.command {
                Command::Parse => {
                    let row = parse_row(&record, self.options).ok_or_else(missing_reading)?;
                    write_csv_parse(
                        &row,
                        self.options.precision,
                        self.options.headers,
                        first,
                        self.writer,
                    )?;
                }
                Command::Validate => {
                    let row = validate_row(&record, self.options);
                    write_csv_validate(&row, self.options.headers, first, self.writer)?;
                }
            }
            summary.count(&record);
            if self.flush_each {
                self.writer.flush()?;
            }
        }
        Ok(summary)
    }
}

pub struct JsonFormatter<'a, W: Write> {
    writer: &'a mut W,
    options: &'a OutputOptions,
    command: Command,
    flush_each: bool,
}

impl<'a, W: Write> JsonFormatter<'a, W> {
    pub fn new(
        writer: &'a mut W,
        options: &'a OutputOptions,
        command: Command,
        flush_each: bool,
    ) -> Self {
        Self {
            writer,
            options,
            command,
            flush_each,
        }
    }
}

impl<'a, W: Write> Formatter for JsonFormatter<'a, W> {
    fn write(&mut self, records: RecordStream) -> Result<OutputSummary, OutputError> {
        let mut summary = OutputSummary::default();
        for record_or_err in records {
            let record = record_or_err?;
            let line = match self.command {
                Command::Parse => {
                    let row = parse_row(&record, self.options).ok_or_else(missing_reading)?;
                    serde_json::to_string(&row)
                }
                Command::Validate => serde_json::to_string(&validate_row(&record, self.options)),
            }
            .map_err(|e| OutputError(format!("JSON encoding failed: {}", e)))?;
            writeln!(self.writer, "{}", line)?;
            summary.count(&record);
            if self.flush_each {
                self.writer.flush()?;
            }
        }
        Ok(summary)
    }
}

/// Text output is buffered so the table can be sized to its content.
pub struct TextFormatter<'a, W: Write> {
    writer: &'a mut W,
    options: &'a OutputOptions,
    command: Command,
}

impl<'a, W: Write> TextFormatter<'a, W> {
    pub fn new(writer: &'a mut W, options: &'a OutputOptions, command: Command) -> Self {
        Self {
            writer,
            options,
            command,
        }
    }

    fn write_parse(&mut self, records: &[ParseRecord]) -> Result<(), OutputError> {
        let precision = self.options.precision;
        let rows = records
            .iter()
            .map(|record| parse_row(record, self.options).ok_or_else(missing_reading))
            .collect::<Result<Vec<_>, _>>()?;

        if let [row] = rows.as_slice()
            && row.input.is_none()
            && row.latitude_format.is_none()
        {
            writeln!(self.writer, "Latitude:  {:.*}°", precision, row.latitude)?;
            writeln!(self.writer, "Longitude: {:.*}°", precision, row.longitude)?;
            return Ok(());
        }

        let mut columns = Vec::new();
        if self.options.should_show_inputs() {
            columns.push(Column::left("Input"));
        }
        columns.extend([Column::right("Latitude"), Column::right("Longitude")]);
        if self.options.show_formats {
            columns.extend([Column::left("Lat format"), Column::left("Lon format")]);
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                let mut cells = Vec::new();
                if let Some(input) = row.input {
                    cells.push(input.to_string());
                }
                cells.push(format!("{:.*}°", precision, row.latitude));
                cells.push(format!("{:.*}°", precision, row.longitude));
                if let (Some(lat_format), Some(lon_format)) =
                    (row.latitude_format, row.longitude_format)
                {
                    cells.push(lat_format.to_string());
                    cells.push(lon_format.to_string());
                }
                cells
            })
            .collect();

        TableFormatter::new(columns, &cells).write(self.writer, &cells)?;
        Ok(())
    }

    fn write_validate(&mut self, records: &[ParseRecord]) -> Result<(), OutputError> {
        let status = |row: &ValidateRow| match row.error {
            Some(reason) => format!("invalid: {}", reason),
            None => "valid".to_string(),
        };

        if !self.options.should_show_inputs() {
            for record in records {
                let row = validate_row(record, self.options);
                writeln!(self.writer, "{}", status(&row))?;
            }
            return Ok(());
        }

        let cells: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                let row = validate_row(record, self.options);
                vec![row.input.unwrap_or_default().to_string(), status(&row)]
            })
            .collect();
        let columns = vec![Column::left("Input"), Column::left("Status")];
        TableFormatter::new(columns, &cells).write(self.writer, &cells)?;
        Ok(())
    }
}

impl<'a, W: Write> Formatter for TextFormatter<'a, W> {
    fn write(&mut self, records: RecordStream) -> Result<OutputSummary, OutputError> {
        let records = records.collect::<Result<Vec<_>, _>>()?;

        let mut summary = OutputSummary::default();
        for record in &records {
            summary.count(record);
        }

        if records.is_empty() {
            return Ok(summary);
        }

        match self.command {
            Command::Parse => self.write_parse(&records)?,
            Command::Validate => self.write_validate(&records)?,
        }
        Ok(summary)
    }
}

pub fn write_records<W: Write + Send>(
    records: RecordStream,
    command: Command,
    params: &Parameters,
    flush_each: bool,
    writer: &mut W,
) -> Result<OutputSummary, OutputError> {
    let options = &params.output;
    let summary = match options.format {
        OutputFormat::Text => TextFormatter::new(writer, options, command).write(records)?,
        OutputFormat::Csv => {
            CsvFormatter::new(writer, options, command, flush_each).write(records)?
        }
        OutputFormat::Json => {
            JsonFormatter::new(writer, options, command, flush_each).write(records)?
        }
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => crate::parquet::write_parquet(records, options, &mut *writer)?,
    };
    writer.flush()?;
    Ok(summary)
}

pub fn dispatch_output(
    records: RecordStream,
    command: Command,
    params: &Parameters,
    flush_each: bool,
) -> Result<OutputSummary, OutputError> {
    let mut writer = BufWriter::new(io::stdout());
    write_records(records, command, params, flush_each, &mut writer)
}
