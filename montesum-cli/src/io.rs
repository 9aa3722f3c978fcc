//! CSV input/output — the record source and the summary writer.
//!
//! Input is headerless CSV with the label at field 0 and measurements at
//! fields 1–3. The reader is flexible about record lengths so short rows
//! reach the core parser and fail as malformed records with an ordinal,
//! rather than dying inside tokenization. Output is one CSV row per
//! (simulation, group) cell in projector order, with an opt-in header.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use montesum_core::{project, RecordSource, SourceError, SummaryGrid};

/// Header row written when the caller opts in.
pub const OUTPUT_HEADER: [&str; 5] = ["simulation", "group", "sum_y0", "sum_y1", "sum_y2"];

/// CSV-backed record source over any reader.
pub struct CsvSource<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
}

impl<R: Read> CsvSource<R> {
    pub fn new(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            records: reader.into_records(),
        }
    }
}

impl<R: Read> RecordSource for CsvSource<R> {
    fn next_record(&mut self) -> Result<Option<Vec<String>>, SourceError> {
        match self.records.next() {
            None => Ok(None),
            Some(Ok(record)) => Ok(Some(record.iter().map(str::to_string).collect())),
            Some(Err(err)) => match err.into_kind() {
                csv::ErrorKind::Io(io_err) => Err(SourceError::Io(io_err)),
                other => Err(SourceError::Malformed(format!("{other:?}"))),
            },
        }
    }
}

/// Open the input stream: a file path, or stdin when none is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdin())),
    }
}

/// Open the output stream: a file path, or stdout when none is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Write the projected grid as CSV rows in simulation-major order.
pub fn write_summaries(writer: impl Write, grid: &SummaryGrid, header: bool) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    if header {
        out.write_record(OUTPUT_HEADER)
            .context("failed to write output header")?;
    }
    for row in project(grid) {
        out.write_record(row.to_fields())
            .context("failed to write output row")?;
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}
