//! Parquet output format support.

use crate::compute::RecordStream;
use crate::data::OutputOptions;
use crate::error::OutputError;
use crate::output::{OutputSummary, parse_row};
use arrow::array::{ArrayRef, Float64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

const BATCH_SIZE: usize = 8192;

fn build_schema(show_inputs: bool, show_formats: bool) -> Arc<Schema> {
    let mut fields = Vec::new();
    if show_inputs {
        fields.push(Field::new("input", DataType::Utf8, false));
    }
    fields.push(Field::new("latitude", DataType::Float64, false));
    fields.push(Field::new("longitude", DataType::Float64, false));
    if show_formats {
        fields.push(Field::new("latitudeFormat", DataType::Utf8, false));
        fields.push(Field::new("longitudeFormat", DataType::Utf8, false));
    }
    Arc::new(Schema::new(fields))
}

struct ColumnBuilders {
    input: Option<StringBuilder>,
    latitude: Float64Builder,
    longitude: Float64Builder,
    latitude_format: Option<StringBuilder>,
    longitude_format: Option<StringBuilder>,
}

impl ColumnBuilders {
    fn new(show_inputs: bool, show_formats: bool) -> Self {
        Self {
            input: show_inputs.then(|| StringBuilder::with_capacity(BATCH_SIZE, BATCH_SIZE * 24)),
            latitude: Float64Builder::with_capacity(BATCH_SIZE),
            longitude: Float64Builder::with_capacity(BATCH_SIZE),
            latitude_format: show_formats
                .then(|| StringBuilder::with_capacity(BATCH_SIZE, BATCH_SIZE * 5)),
            longitude_format: show_formats
                .then(|| StringBuilder::with_capacity(BATCH_SIZE, BATCH_SIZE * 5)),
        }
    }

    /// Drains the builders into arrays, in schema order.
    fn finish(&mut self) -> Vec<ArrayRef> {
        let mut arrays: Vec<ArrayRef> = Vec::new();
        if let Some(b) = self.input.as_mut() {
            arrays.push(Arc::new(b.finish()) as ArrayRef);
        }
        arrays.push(Arc::new(self.latitude.finish()) as ArrayRef);
        arrays.push(Arc::new(self.longitude.finish()) as ArrayRef);
        if let Some(b) = self.latitude_format.as_mut() {
            arrays.push(Arc::new(b.finish()) as ArrayRef);
        }
        if let Some(b) = self.longitude_format.as_mut() {
            arrays.push(Arc::new(b.finish()) as ArrayRef);
        }
        arrays
    }
}

pub fn write_parquet<W: Write + Send>(
    records: RecordStream,
    options: &OutputOptions,
    writer: W,
) -> Result<OutputSummary, OutputError> {
    let show_inputs = options.should_show_inputs();
    let schema = build_schema(show_inputs, options.show_formats);
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut parquet_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))
        .map_err(|e| OutputError(format!("Parquet writer error: {}", e)))?;

    let mut builders = ColumnBuilders::new(show_inputs, options.show_formats);
    let mut summary = OutputSummary::default();
    let mut batch_count = 0;

    for record_or_err in records {
        let record = record_or_err?;
        let row = parse_row(&record, options)
            .ok_or_else(|| OutputError::from("Unexpected invalid record in parse output"))?;

        if let (Some(b), Some(input)) = (builders.input.as_mut(), row.input) {
            b.append_value(input);
        }
        builders.latitude.append_value(row.latitude);
        builders.longitude.append_value(row.longitude);
        if let (Some(b), Some(format)) = (builders.latitude_format.as_mut(), row.latitude_format) {
            b.append_value(format);
        }
        if let (Some(b), Some(format)) = (builders.longitude_format.as_mut(), row.longitude_format)
        {
            b.append_value(format);
        }

        summary.records += 1;
        batch_count += 1;

        if batch_count >= BATCH_SIZE {
            flush_batch(&mut parquet_writer, &schema, &mut builders)?;
            batch_count = 0;
        }
    }

    if batch_count > 0 {
        flush_batch(&mut parquet_writer, &schema, &mut builders)?;
    }

    parquet_writer
        .close()
        .map_err(|e| OutputError(format!("Failed to close parquet: {}", e)))?;

    Ok(summary)
}

fn flush_batch<W: Write + Send>(
    writer: &mut ArrowWriter<W>,
    schema: &Arc<Schema>,
    builders: &mut ColumnBuilders,
) -> Result<(), OutputError> {
    let batch = RecordBatch::try_new(schema.clone(), builders.finish())
        .map_err(|e| OutputError(format!("Failed to build record batch: {}", e)))?;
    writer
        .write(&batch)
        .map_err(|e| OutputError(format!("Failed to write parquet batch: {}", e)))
}
