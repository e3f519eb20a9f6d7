//! Writer dispatch and the conflict-mode vocabulary.
//!
//! Writers form a closed set of tagged variants dispatched through one
//! interface. Unknown writer names and unknown conflict-mode strings are
//! rejected at construction, not at use.

mod bulk_import;
mod insert_into;
mod spark;

pub use bulk_import::BulkImportWriter;
pub use insert_into::InsertIntoWriter;
pub use spark::SparkWriter;

use crate::config::Config;
use crate::payload::Payload;
use crate::table::Table;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// What happens when the destination table already exists.
///
/// String form is the case-sensitive lowercase vocabulary `error`,
/// `overwrite`, `append`, `ignore`. Not every writer supports all four;
/// unsupported combinations fail at write time with a precondition error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail when the table exists
    Error,
    /// Delete and recreate the table
    Overwrite,
    /// Write into the existing table
    Append,
    /// Silently do nothing when the table exists
    Ignore,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Error => "error",
            WriteMode::Overwrite => "overwrite",
            WriteMode::Append => "append",
            WriteMode::Ignore => "ignore",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "error" => Ok(WriteMode::Error),
            "overwrite" => Ok(WriteMode::Overwrite),
            "append" => Ok(WriteMode::Append),
            "ignore" => Ok(WriteMode::Ignore),
            other => Err(Error::InvalidArgument(format!(
                "invalid conflict mode `{other}`; expected one of error, overwrite, append, ignore"
            ))),
        }
    }
}

/// One of the three upload strategies.
pub enum Writer {
    InsertInto(InsertIntoWriter),
    BulkImport(BulkImportWriter),
    Spark(SparkWriter),
}

impl Writer {
    /// Construct a writer from its case-insensitive name, one of
    /// `bulk_import`, `insert_into`, `spark`.
    pub fn from_name(name: &str, config: &Config) -> Result<Writer> {
        match name.to_ascii_lowercase().as_str() {
            "bulk_import" => Ok(Writer::BulkImport(BulkImportWriter::new())),
            "insert_into" => Ok(Writer::InsertInto(InsertIntoWriter::new())),
            "spark" => Ok(Writer::Spark(SparkWriter::new(config.spark.clone()))),
            other => Err(Error::InvalidArgument(format!(
                "unknown writer `{other}`; expected one of bulk_import, insert_into, spark"
            ))),
        }
    }

    /// Construct the writer named by the configuration.
    pub fn from_config(config: &Config) -> Result<Writer> {
        Self::from_name(&config.writer, config)
    }

    /// Name of the selected strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Writer::InsertInto(_) => "insert_into",
            Writer::BulkImport(_) => "bulk_import",
            Writer::Spark(_) => "spark",
        }
    }

    /// Write the payload to the table under the given conflict mode.
    pub fn write(&mut self, payload: Payload, table: &Table, mode: WriteMode) -> Result<()> {
        match self {
            Writer::InsertInto(writer) => writer.write(payload, table, mode),
            Writer::BulkImport(writer) => writer.write(payload, table, mode),
            Writer::Spark(writer) => writer.write(payload, table, mode),
        }
    }

    /// Release writer-held resources. A no-op except for the spark variant,
    /// which stops its engine session.
    pub fn close(&mut self) -> Result<()> {
        match self {
            Writer::InsertInto(_) | Writer::BulkImport(_) => Ok(()),
            Writer::Spark(writer) => writer.close(),
        }
    }
}
