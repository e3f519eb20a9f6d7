//! Tabular payload model.
//!
//! A payload is an ordered list of named columns plus row-major value tuples.
//! Column types are inferred per writer at write time (numeric vs. text) and
//! never stored persistently. The payload also owns the CSV staging format
//! used by the bulk-import writer and CSV ingestion for file-based callers.

use crate::{Error, Result};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Name of the timestamp column required by the bulk-import protocol.
pub const TIME_COLUMN: &str = "time";

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce into the string form used for text columns. Nulls stay null.
    pub fn coerce_text(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Int(i) => Value::Text(i.to_string()),
            Value::Float(f) => Value::Text(f.to_string()),
            Value::Text(s) => Value::Text(s.clone()),
        }
    }

    /// Render as a SQL literal. Strings are single-quoted with embedded
    /// single quotes rewritten to double quotes; everything else uses its
    /// natural text form.
    pub fn sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => format!("'{}'", s.replace('\'', "\"")),
        }
    }

    /// Render as a CSV field. Nulls become empty fields.
    fn csv_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

/// Warehouse column types a payload column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Bigint,
    Double,
    Varchar,
}

impl SqlType {
    /// SQL spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::Bigint => "bigint",
            SqlType::Double => "double",
            SqlType::Varchar => "varchar",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named destination column with its inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
}

/// Ordered named columns plus row-major value tuples.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Payload {
    /// Build a payload, validating that every row matches the column arity.
    pub fn try_new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidArgument(format!(
                    "row {} has {} values but the payload declares {} columns",
                    index,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Read a payload from a CSV file. The header row names the columns;
    /// fields parse as integers, then floats, with empty fields as nulls and
    /// anything else as text.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(parse_field).collect());
        }
        Self::try_new(columns, rows)
    }

    /// Serialize as CSV with a header row (the bulk-import staging format).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            out.write_record(row.iter().map(Value::csv_field))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row tuples in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether a column with the given name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Append a `time` column holding `now` in every row unless one already
    /// exists. The bulk-import protocol requires the column.
    pub fn ensure_time_column(&mut self, now: i64) {
        if self.has_column(TIME_COLUMN) {
            return;
        }
        self.columns.push(TIME_COLUMN.to_string());
        for row in &mut self.rows {
            row.push(Value::Int(now));
        }
    }

    /// Infer a destination type per column: all-integer columns map to
    /// `bigint`, numeric columns with a float to `double`, and everything
    /// else to `varchar`. Values in `varchar` columns are coerced to their
    /// string form in place, since they will be rendered as text literals.
    pub fn infer_schema(&mut self) -> Vec<ColumnDef> {
        let types: Vec<SqlType> = (0..self.columns.len())
            .map(|index| infer_column_type(&self.rows, index))
            .collect();

        for (index, sql_type) in types.iter().enumerate() {
            if *sql_type == SqlType::Varchar {
                for row in &mut self.rows {
                    row[index] = row[index].coerce_text();
                }
            }
        }

        self.columns
            .iter()
            .zip(types)
            .map(|(name, sql_type)| ColumnDef {
                name: name.clone(),
                sql_type,
            })
            .collect()
    }
}

fn infer_column_type(rows: &[Vec<Value>], index: usize) -> SqlType {
    let mut saw_int = false;
    let mut saw_float = false;
    for row in rows {
        match &row[index] {
            Value::Null => {}
            Value::Int(_) => saw_int = true,
            Value::Float(_) => saw_float = true,
            Value::Text(_) => return SqlType::Varchar,
        }
    }
    if saw_float {
        SqlType::Double
    } else if saw_int {
        SqlType::Bigint
    } else {
        // no non-null evidence either way
        SqlType::Varchar
    }
}

fn parse_field(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(raw.to_string())
}

/// Current unix time in seconds.
pub(crate) fn unix_time() -> i64 {
    chrono::Utc::now().timestamp()
}
