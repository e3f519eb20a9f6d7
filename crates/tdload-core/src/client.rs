//! Consumed warehouse capabilities.
//!
//! The warehouse is an external system reached through these narrow traits.
//! Implementations own transport, authentication, and the query-language
//! surface; this crate only drives them.

use crate::payload::ColumnDef;
use crate::Result;
use std::path::Path;

/// Query engine a SQL statement is routed to.
///
/// The insert-into writer only routes to Presto; Hive is part of the
/// client's engine vocabulary for callers issuing their own statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEngine {
    Presto,
    Hive,
}

impl QueryEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryEngine::Presto => "presto",
            QueryEngine::Hive => "hive",
        }
    }
}

/// The warehouse client capability a [`crate::Table`] carries.
///
/// Existence checks must reflect the current remote state on every call;
/// writers rely on that to honor their conflict modes.
pub trait WarehouseClient: Send + Sync {
    /// API key this client authenticates with.
    fn apikey(&self) -> &str;

    /// Endpoint this client talks to.
    fn endpoint(&self) -> &str;

    /// Whether the table currently exists.
    fn table_exists(&self, database: &str, table: &str) -> Result<bool>;

    /// Create a table, optionally with an explicit schema. Creation is
    /// atomic on the warehouse side: either the table exists afterwards or
    /// the call fails without a partial table.
    fn create_table(
        &self,
        database: &str,
        table: &str,
        schema: Option<&[ColumnDef]>,
    ) -> Result<()>;

    /// Delete a table.
    fn delete_table(&self, database: &str, table: &str) -> Result<()>;

    /// Execute a SQL statement on the given engine, blocking until it
    /// completes.
    fn query(&self, sql: &str, engine: QueryEngine) -> Result<()>;

    /// Open a bulk-import session bound to the given table.
    fn create_bulk_import(
        &self,
        session_name: &str,
        database: &str,
        table: &str,
    ) -> Result<Box<dyn BulkImportSession>>;
}

/// One ephemeral server-side bulk-import session.
///
/// The session moves through created, part-uploaded, frozen, performed and
/// committed; `delete` tears it down from any state. Record counts are
/// meaningful only after `perform` returns.
pub trait BulkImportSession {
    /// Server-side session name.
    fn name(&self) -> &str;

    /// Upload a local file as one named part.
    fn upload_part(&self, part_name: &str, format: &str, path: &Path) -> Result<()>;

    /// Stop accepting parts.
    fn freeze(&self) -> Result<()>;

    /// Run server-side validation and ingestion, blocking when `wait`.
    fn perform(&self, wait: bool) -> Result<()>;

    /// Records that failed validation during the last perform.
    fn error_records(&self) -> u64;

    /// Records that passed validation during the last perform.
    fn valid_records(&self) -> u64;

    /// Commit the performed session into the table, blocking when `wait`.
    fn commit(&self, wait: bool) -> Result<()>;

    /// Delete the server-side session.
    fn delete(&self) -> Result<()>;
}
