use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, LaunchDataset,
    LaunchRecord, LaunchSite, Outcome, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can stop a dataset from loading. Any of these is fatal:
/// no partially loaded dataset is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: unknown launch site '{site}'")]
    UnknownSite { row: usize, site: String },

    #[error("dataset contains no launch records")]
    Empty,

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the reference layout, one launch per row
/// * `.json`    – `[{ "Launch Site": ..., "class": ..., ... }, ...]`
/// * `.parquet` – one column per field, matched by name
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => load_csv(open()?),
        "json" => load_json(open()?),
        "parquet" | "pq" => load_parquet(open()?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Row validation shared by every format
// ---------------------------------------------------------------------------

/// One row as it appears in the file, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawRecord {
    fn validate(self, row: usize) -> Result<LaunchRecord, LoadError> {
        let site = LaunchSite::from_name(self.launch_site.trim()).ok_or(LoadError::UnknownSite {
            row,
            site: self.launch_site.clone(),
        })?;

        let outcome = Outcome::parse_class(&self.class).ok_or_else(|| LoadError::InvalidValue {
            row,
            column: COL_CLASS,
            value: self.class.clone(),
        })?;

        let payload_mass_kg = parse_payload(&self.payload_mass).ok_or_else(|| {
            LoadError::InvalidValue {
                row,
                column: COL_PAYLOAD_MASS,
                value: self.payload_mass.clone(),
            }
        })?;

        Ok(LaunchRecord::new(
            site,
            outcome,
            payload_mass_kg,
            self.booster_category.trim(),
        ))
    }
}

fn parse_payload(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

fn finish(records: Vec<LaunchRecord>) -> Result<LaunchDataset, LoadError> {
    LaunchDataset::from_records(records).ok_or(LoadError::Empty)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Columns are matched by exact name; extra columns are ignored.
pub fn load_csv<R: Read>(source: R) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        records.push(raw.validate(row_no)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
pub fn load_json<R: Read>(source: R) -> Result<LaunchDataset, LoadError> {
    let root: Vec<HashMap<String, JsonValue>> = serde_json::from_reader(source)?;

    let mut records = Vec::with_capacity(root.len());
    for (i, obj) in root.iter().enumerate() {
        let field = |col: &'static str| -> Result<String, LoadError> {
            match obj.get(col) {
                Some(JsonValue::String(s)) => Ok(s.clone()),
                Some(JsonValue::Number(n)) => Ok(n.to_string()),
                Some(other) => Err(LoadError::InvalidValue {
                    row: i,
                    column: col,
                    value: other.to_string(),
                }),
                None => Err(LoadError::MissingColumn(col.to_string())),
            }
        };

        let raw = RawRecord {
            launch_site: field(COL_LAUNCH_SITE)?,
            class: field(COL_CLASS)?,
            payload_mass: field(COL_PAYLOAD_MASS)?,
            booster_category: field(COL_BOOSTER_CATEGORY)?,
        };
        records.push(raw.validate(i)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema, matched by column name:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `class`, `Payload Mass (kg)`: Int32, Int64, Float32 or Float64
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
pub fn load_parquet(file: File) -> Result<LaunchDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    for col in REQUIRED_COLUMNS {
        if builder.schema().index_of(col).is_err() {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;

        let site_col = column_by_name(&batch, COL_LAUNCH_SITE)?;
        let class_col = column_by_name(&batch, COL_CLASS)?;
        let payload_col = column_by_name(&batch, COL_PAYLOAD_MASS)?;
        let booster_col = column_by_name(&batch, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let cell = Cell { row, absolute_row: row_offset + row };
            let raw = RawRecord {
                launch_site: extract_text(site_col, cell, COL_LAUNCH_SITE)?,
                class: extract_number(class_col, cell, COL_CLASS)?,
                payload_mass: extract_number(payload_col, cell, COL_PAYLOAD_MASS)?,
                booster_category: extract_text(booster_col, cell, COL_BOOSTER_CATEGORY)?,
            };
            records.push(raw.validate(cell.absolute_row)?);
        }
        row_offset += batch.num_rows();
    }

    finish(records)
}

// -- Parquet / Arrow helpers --

/// Row position within the current batch and within the whole file.
#[derive(Clone, Copy)]
struct Cell {
    row: usize,
    absolute_row: usize,
}

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .schema()
        .index_of(name)
        .map(|idx| batch.column(idx))
        .map_err(|_| LoadError::MissingColumn(name.to_string()))
}

fn bad_cell(col: &ArrayRef, cell: Cell, column: &'static str) -> LoadError {
    let value = if col.is_null(cell.row) {
        "<null>".to_string()
    } else {
        format!("{:?}", col.data_type())
    };
    LoadError::InvalidValue {
        row: cell.absolute_row,
        column,
        value,
    }
}

/// Extract a text cell from a Utf8 or LargeUtf8 column.
fn extract_text(col: &ArrayRef, cell: Cell, column: &'static str) -> Result<String, LoadError> {
    if col.is_null(cell.row) {
        return Err(bad_cell(col, cell, column));
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(cell.row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(cell.row).to_string()),
        _ => None,
    };
    text.ok_or_else(|| bad_cell(col, cell, column))
}

/// Extract a numeric cell as text so it goes through the same validation
/// as CSV input.
fn extract_number(col: &ArrayRef, cell: Cell, column: &'static str) -> Result<String, LoadError> {
    if col.is_null(cell.row) {
        return Err(bad_cell(col, cell, column));
    }
    let any = col.as_any();
    let row = cell.row;
    let text = match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row).to_string()),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row).to_string()),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row).to_string()),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row).to_string()),
        _ => None,
    };
    text.ok_or_else(|| bad_cell(col, cell, column))
}
