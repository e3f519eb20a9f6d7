//! Table handle.

use crate::client::WarehouseClient;
use crate::payload::ColumnDef;
use crate::Result;
use std::sync::Arc;
use tracing::debug;

/// Identifies a destination table and carries the client capability used to
/// check, create, delete, and query it.
///
/// Existence is never cached here: [`Table::exists`] asks the client every
/// time, so a decision made right after the call reflects the current remote
/// state.
#[derive(Clone)]
pub struct Table {
    database: String,
    table: String,
    client: Arc<dyn WarehouseClient>,
}

impl Table {
    /// Create a handle for `database.table` backed by the given client.
    pub fn new(
        database: impl Into<String>,
        table: impl Into<String>,
        client: Arc<dyn WarehouseClient>,
    ) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            client,
        }
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.table
    }

    /// Fully qualified `database.table` name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }

    /// The client capability this handle was built with.
    pub fn client(&self) -> &dyn WarehouseClient {
        self.client.as_ref()
    }

    /// Whether the table currently exists, queried fresh.
    pub fn exists(&self) -> Result<bool> {
        self.client.table_exists(&self.database, &self.table)
    }

    /// Create the table, optionally with an explicit schema.
    pub fn create(&self, schema: Option<&[ColumnDef]>) -> Result<()> {
        debug!(table = %self.qualified_name(), "creating table");
        self.client.create_table(&self.database, &self.table, schema)
    }

    /// Delete the table.
    pub fn delete(&self) -> Result<()> {
        debug!(table = %self.qualified_name(), "deleting table");
        self.client.delete_table(&self.database, &self.table)
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("database", &self.database)
            .field("table", &self.table)
            .finish()
    }
}
