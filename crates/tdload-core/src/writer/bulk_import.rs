//! Bulk-file writer.
//!
//! Stages the payload to a temporary CSV file and drives the bulk-import
//! session protocol: create, upload one part, freeze, perform, then commit
//! or tear down. The session is deleted on the upload/freeze failure path
//! and after a successful commit; it is never left dangling by this writer.

use crate::client::BulkImportSession;
use crate::payload::{unix_time, Payload};
use crate::table::Table;
use crate::writer::WriteMode;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Writer that loads data through the bulk-import protocol.
#[derive(Debug, Default)]
pub struct BulkImportWriter;

impl BulkImportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the payload under the given conflict mode.
    ///
    /// The protocol has no append semantics, so `append` fails regardless of
    /// whether the table exists. A `time` column with the current unix time
    /// is injected when the payload lacks one.
    pub fn write(&mut self, mut payload: Payload, table: &Table, mode: WriteMode) -> Result<()> {
        if mode == WriteMode::Append {
            return Err(Error::UnsupportedMode {
                mode: mode.to_string(),
                writer: "bulk_import",
            });
        }

        if table.exists()? {
            match mode {
                WriteMode::Error => {
                    return Err(Error::TableExists {
                        database: table.database().to_string(),
                        table: table.name().to_string(),
                    });
                }
                WriteMode::Ignore => {
                    debug!(table = %table.qualified_name(), "table exists, ignoring write");
                    return Ok(());
                }
                WriteMode::Overwrite => {
                    table.delete()?;
                    table.create(None)?;
                }
                WriteMode::Append => unreachable!("rejected above"),
            }
        } else {
            table.create(None)?;
        }

        let now = unix_time();
        payload.ensure_time_column(now);

        let staged = tempfile::Builder::new()
            .prefix("tdload-")
            .suffix(".csv")
            .tempfile()?;
        payload.write_csv(staged.as_file())?;

        let session_name = format!("session-{now}");
        let session =
            table
                .client()
                .create_bulk_import(&session_name, table.database(), table.name())?;
        debug!(session = %session_name, table = %table.qualified_name(), "created bulk import session");

        if let Err(e) = upload_and_freeze(session.as_ref(), staged.path()) {
            if let Err(delete_err) = session.delete() {
                warn!(
                    session = %session_name,
                    error = %delete_err,
                    "failed to delete bulk import session after upload failure"
                );
            }
            return Err(Error::Remote(format!("failed to upload file: {e}")));
        }

        session.perform(true)?;

        let error_records = session.error_records();
        if error_records > 0 {
            warn!(session = %session_name, error_records, "detected error records");
        }

        let valid_records = session.valid_records();
        if valid_records == 0 {
            return Err(Error::NoRecordsImported {
                session: session.name().to_string(),
            });
        }
        info!(session = %session_name, records = valid_records, "imported records");

        session.commit(true)?;
        session.delete()?;
        Ok(())
    }
}

fn upload_and_freeze(session: &dyn BulkImportSession, staged: &Path) -> Result<()> {
    session.upload_part("part", "csv", staged)?;
    session.freeze()
}
