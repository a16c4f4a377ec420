//! Click-log records.
//!
//! Input is line-oriented and tab-separated:
//!
//! ```text
//! query \t target \t frequency
//! ```
//!
//! Lines are lowercased and trimmed before they are split.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermWeightError};

/// One (query, click target, frequency) observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub query: String,
    pub target: String,
    pub frequency: u64,
}

impl Record {
    pub fn new<Q: Into<String>, T: Into<String>>(query: Q, target: T, frequency: u64) -> Self {
        Record {
            query: query.into(),
            target: target.into(),
            frequency,
        }
    }

    /// Parse a single input line.
    ///
    /// Returns a [`TermWeightError::Parse`] when the line does not have exactly
    /// three fields or the frequency is not a non-negative integer.
    pub fn parse_line(line: &str) -> Result<Record> {
        let line = line.trim().to_lowercase();
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            return Err(TermWeightError::parse(format!(
                "expected 3 tab-separated fields, found {}: {}",
                fields.len(),
                line
            )));
        }

        let frequency = fields[2].trim().parse::<u64>().map_err(|e| {
            TermWeightError::parse(format!("invalid frequency '{}': {}", fields[2], e))
        })?;

        Ok(Record::new(fields[0], fields[1], frequency))
    }
}

/// Streams records from a buffered reader.
///
/// Each item is either a parsed record, a [`TermWeightError::Parse`] for a
/// malformed line (the caller decides whether to skip it), or an I/O error.
pub struct RecordReader<R> {
    reader: R,
    buf: String,
    line_number: u64,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        RecordReader {
            reader,
            buf: String::new(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line_number = self.line_number;
                let line = self.buf.trim_end_matches(['\n', '\r']);
                Some(Record::parse_line(line).map_err(|e| match e {
                    TermWeightError::Parse(msg) => {
                        TermWeightError::parse(format!("line {}: {}", line_number, msg))
                    }
                    other => other,
                }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
