//! CSV batch processing.
//!
//! Reads a CSV with every cell treated as text, evaluates one column per row,
//! and writes the input columns followed by the six [`EvaluationRecord`]
//! columns. Rows are handled in fixed-size chunks: the header is written once,
//! then each chunk is appended and flushed, so progress is visible on large
//! files and a failure part-way leaves the completed chunks on disk.

use crate::error::{DatestampError, Result};
use crate::{Context, EvaluationRecord, Settings, extract_with};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the input's stem to name the output file.
pub const OUTPUT_SUFFIX: &str = "_DateExtractionResults.csv";

/// Outcome of a table run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSummary {
    /// Data rows processed (header excluded).
    pub rows: usize,
    /// Chunks written.
    pub chunks: usize,
    /// Rows whose consensus date is non-empty.
    pub dated_rows: usize,
    /// Output file, when processing a file on disk.
    pub output: Option<PathBuf>,
}

/// `<dir>/<stem>_DateExtractionResults.csv` for `input`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Process the CSV at `input`, writing results next to it.
pub fn process_file(input: &Path, settings: &Settings, context: &Context) -> Result<TableSummary> {
    if !input.is_file() {
        return Err(DatestampError::MissingInputFile { path: input.to_path_buf() });
    }
    settings.validate()?;

    let output = output_path_for(input);
    let reader = File::open(input)?;
    let writer = File::create(&output)?;
    tracing::info!(input = %input.display(), output = %output.display(), "processing table");

    let mut summary = process_reader(reader, writer, settings, context)?;
    summary.output = Some(output);
    Ok(summary)
}

/// Process CSV from `reader` into `writer`.
pub fn process_reader<R: Read, W: Write>(
    reader: R,
    writer: W,
    settings: &Settings,
    context: &Context,
) -> Result<TableSummary> {
    let chunk_size = settings.table.chunk_size.max(1);
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let text_index = text_column_index(&headers, settings.table.text_column.as_deref())?;
    tracing::debug!(column = &headers[text_index], "text column");

    let mut wtr = WriterBuilder::new().from_writer(writer);
    let mut header_row: Vec<&str> = headers.iter().collect();
    header_row.extend(EvaluationRecord::COLUMNS);
    wtr.write_record(&header_row)?;
    wtr.flush()?;

    let mut summary = TableSummary::default();
    let mut chunk: Vec<StringRecord> = Vec::with_capacity(chunk_size);
    for record in rdr.records() {
        chunk.push(record?);
        if chunk.len() == chunk_size {
            write_chunk(&mut wtr, &chunk, headers.len(), text_index, settings, context, &mut summary)?;
            chunk.clear();
        }
    }
    if !chunk.is_empty() {
        write_chunk(&mut wtr, &chunk, headers.len(), text_index, settings, context, &mut summary)?;
    }

    tracing::info!(rows = summary.rows, chunks = summary.chunks, dated = summary.dated_rows, "all done");
    Ok(summary)
}

fn text_column_index(headers: &StringRecord, name: Option<&str>) -> Result<usize> {
    if headers.is_empty() {
        return Err(DatestampError::EmptyHeader);
    }
    match name {
        Some(name) => headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatestampError::MissingTextColumn { name: name.to_string() }),
        None => Ok(headers.len() - 1),
    }
}

fn write_chunk<W: Write>(
    wtr: &mut csv::Writer<W>,
    chunk: &[StringRecord],
    width: usize,
    text_index: usize,
    settings: &Settings,
    context: &Context,
    summary: &mut TableSummary,
) -> Result<()> {
    for row in chunk {
        let text = row.get(text_index).unwrap_or("");
        let record = extract_with(text, context, &settings.extraction);
        if !record.consensus.is_empty() {
            summary.dated_rows += 1;
        }

        // Short rows are padded and long rows cut so the output stays rectangular.
        let mut out: Vec<&str> = (0..width).map(|i| row.get(i).unwrap_or("")).collect();
        out.extend(record.fields());
        wtr.write_record(&out)?;
    }
    wtr.flush()?;

    summary.rows += chunk.len();
    summary.chunks += 1;
    tracing::info!(chunk = summary.chunks, rows = chunk.len(), total = summary.rows, "wrote chunk");
    Ok(())
}
