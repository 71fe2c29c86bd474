//! `RecordStreamer` supports the verb pipeline by reading `Record`s from
//! STDIN and writing them to STDOUT, so that executable tools built on this
//! crate can be chained together with Unix pipes the way `mdi` tools are
//! (SPEC_FULL.md §2, "Record I/O (ambient)").
//!
//! Unlike `mdi`'s own `RecordStreamer` (see the `mdi_streamer` crate this
//! module is patterned on), records here are not deserialized into a
//! caller-supplied typed struct: fields are heterogeneous and ordered by
//! insertion (spec.md §1, "Non-goals"), so rows are read as plain CSV
//! records and reassembled into `Record`s directly. Streaming is always
//! serial, one record at a time (spec.md §1, "Non-goals": parallel
//! execution across records is out of scope). This module only covers the
//! in-place case (SPEC_FULL.md's single scalar-valued-field verbs never
//! change a record's field count).

// dependencies
use std::io::{stdin, stdout, Stdin, Stdout};
use csv::{Reader, ReaderBuilder, Writer, WriterBuilder, StringRecord};

use crate::record::Record;

/// Reads tab-delimited, headerless `Record`s from STDIN, in order.
///
/// Field names default to positional labels (`"1"`, `"2"`, `"3"`, ...)
/// matching the width of the first row read, per SPEC_FULL.md §6's implicit
/// positional header; pass `true` to `RecordReader::new` to instead treat
/// the first input line as a literal header naming each field.
pub struct RecordReader {
    reader: Reader<Stdin>,
    header: Option<Vec<String>>,
    use_header: bool,
}

impl RecordReader {
    /// Open a reader over STDIN. `use_header` selects whether the first
    /// line of input is consumed as a field-name header (`true`) or
    /// field names are derived positionally from row width (`false`).
    pub fn new(use_header: bool) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false) // we read the header ourselves, when present
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(stdin());
        Self { reader, header: None, use_header }
    }

    /// Read the next record, or `None` at end of input (the stream's
    /// end-of-stream signal, mirrored onto the first verb in a pipeline).
    pub fn next_record(&mut self) -> Option<Record> {
        let mut row = StringRecord::new();
        loop {
            let read = self
                .reader
                .read_record(&mut row)
                .unwrap_or_else(|e| panic!("failed to read input record: {e}"));
            if !read {
                return None;
            }
            if self.use_header && self.header.is_none() {
                self.header = Some(row.iter().map(str::to_string).collect());
                row.clear();
                continue;
            }
            break;
        }
        let names = self.field_names(row.len());
        let mut rec = Record::new();
        for (name, value) in names.into_iter().zip(row.iter()) {
            rec.put(name, value);
        }
        Some(rec)
    }

    fn field_names(&self, width: usize) -> Vec<String> {
        match &self.header {
            Some(header) => header.clone(),
            None => (1..=width).map(|i| i.to_string()).collect(),
        }
    }
}

/// Writes `Record`s to STDOUT in field order, tab-delimited and headerless,
/// in the order they are written.
pub struct RecordWriter {
    writer: Writer<Stdout>,
}

impl RecordWriter {
    pub fn new() -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .flexible(true)
            .from_writer(stdout());
        Self { writer }
    }

    /// Write one record's field values, in field order.
    pub fn write_record(&mut self, rec: &Record) {
        let values: Vec<&str> = rec.iter().map(|(_, v)| v).collect();
        self.writer
            .write_record(values)
            .unwrap_or_else(|e| panic!("failed to write output record: {e}"));
    }

    /// Flush buffered output. Must be called once after the last record is
    /// written, since `Writer` buffers internally.
    pub fn flush(&mut self) {
        self.writer.flush().unwrap_or_else(|e| panic!("failed to flush output: {e}"));
    }
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self::new()
    }
}
