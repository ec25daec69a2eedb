//! Table
//!
//! Reader for headerless, comma separated numeric files. The column count is
//! fixed by the first row; rows that disagree are kept, padded with zeros or
//! truncated, and reported with a warning.
use crate::errors::SaplingError;
use log::warn;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Row major, rectangular buffer of parsed values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The values, `rows * cols` long.
    pub data: Vec<f32>,
    /// Number of rows read.
    pub rows: usize,
    /// Number of columns, taken from the first row.
    pub cols: usize,
}

impl Table {
    /// Create a table from an existing row major buffer.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self, SaplingError> {
        if data.len() != rows * cols {
            return Err(SaplingError::InvalidParameter(
                "data".to_string(),
                format!("{} values", rows * cols),
                format!("{}", data.len()),
            ));
        }
        Ok(Table { data, rows, cols })
    }

    /// Read a table from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SaplingError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SaplingError::UnableToRead(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(file)
    }

    /// Read a table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SaplingError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut data = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| SaplingError::UnableToRead(e.to_string()))?;
            let cols = *cols.get_or_insert(record.len());

            // Parsing stops at the first field that is not a number.
            let values: Vec<f32> = record.iter().map_while(|f| f.parse::<f32>().ok()).collect();
            if values.len() != cols {
                warn!("Expected {} columns, got {} on line {}", cols, values.len(), line + 1);
            }
            data.extend(values.iter().copied().chain(std::iter::repeat(0.0)).take(cols));
            rows += 1;
        }

        Ok(Table {
            data,
            rows,
            cols: cols.unwrap_or(0),
        })
    }

    /// Get a single row of the table.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// Write predictions as an `Id,Prediction` table, with 1-based ids and
/// labels truncated to integers.
pub fn write_predictions<W: Write>(writer: W, preds: &[f32]) -> Result<(), SaplingError> {
    let to_err = |e: csv::Error| SaplingError::UnableToWrite(e.to_string());
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Id", "Prediction"]).map_err(to_err)?;
    for (i, p) in preds.iter().enumerate() {
        wtr.write_record([(i + 1).to_string(), (*p as i64).to_string()])
            .map_err(to_err)?;
    }
    wtr.flush().map_err(|e| SaplingError::UnableToWrite(e.to_string()))
}
