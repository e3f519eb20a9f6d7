//! Row-insertion writer.
//!
//! Translates the payload into one batched `INSERT INTO ... VALUES ...`
//! statement issued through the Presto query engine. There is no
//! transactional rollback if the statement partially applies server-side;
//! callers accepting that limitation pick this writer for small payloads.

use crate::client::QueryEngine;
use crate::payload::{ColumnDef, Payload, Value};
use crate::table::Table;
use crate::writer::WriteMode;
use crate::{Error, Result};
use tracing::debug;

/// Writer that loads data by issuing an INSERT INTO query.
#[derive(Debug, Default)]
pub struct InsertIntoWriter;

impl InsertIntoWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the payload under the given conflict mode.
    ///
    /// The destination schema is inferred per column (integer columns map to
    /// `bigint`, floats to `double`, everything else to `varchar` with
    /// values stringified), then every row is rendered as a parenthesized
    /// literal list and issued as a single statement.
    pub fn write(&mut self, mut payload: Payload, table: &Table, mode: WriteMode) -> Result<()> {
        if payload.row_count() == 0 {
            return Err(Error::InvalidArgument(
                "cannot INSERT an empty payload".into(),
            ));
        }

        let schema = payload.infer_schema();

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
                WriteMode::Append => {}
                WriteMode::Overwrite => {
                    table.delete()?;
                    table.create(Some(&schema))?;
                }
            }
        } else {
            table.create(Some(&schema))?;
        }

        let statement = build_insert(table, &schema, payload.rows());
        debug!(
            table = %table.qualified_name(),
            rows = payload.row_count(),
            "issuing batched INSERT"
        );
        table.client().query(&statement, QueryEngine::Presto)
    }
}

fn build_insert(table: &Table, schema: &[ColumnDef], rows: &[Vec<Value>]) -> String {
    let columns = schema
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let values = rows
        .iter()
        .map(|row| {
            let literals = row
                .iter()
                .map(Value::sql_literal)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({literals})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        table.qualified_name(),
        columns,
        values
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BulkImportSession, WarehouseClient};
    use crate::payload::SqlType;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(Option<Vec<(String, SqlType)>>),
        Delete,
        Query(String),
    }

    #[derive(Default)]
    struct MockClient {
        exists: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl MockClient {
        fn new(exists: bool) -> Arc<Self> {
            Arc::new(Self {
                exists,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl WarehouseClient for MockClient {
        fn apikey(&self) -> &str {
            "K1"
        }

        fn endpoint(&self) -> &str {
            "https://api.treasuredata.com"
        }

        fn table_exists(&self, _database: &str, _table: &str) -> Result<bool> {
            Ok(self.exists)
        }

        fn create_table(
            &self,
            _database: &str,
            _table: &str,
            schema: Option<&[ColumnDef]>,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Create(schema.map(|s| {
                s.iter().map(|c| (c.name.clone(), c.sql_type)).collect()
            })));
            Ok(())
        }

        fn delete_table(&self, _database: &str, _table: &str) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Delete);
            Ok(())
        }

        fn query(&self, sql: &str, engine: QueryEngine) -> Result<()> {
            assert_eq!(engine, QueryEngine::Presto);
            self.calls.lock().unwrap().push(Call::Query(sql.to_string()));
            Ok(())
        }

        fn create_bulk_import(
            &self,
            _session_name: &str,
            _database: &str,
            _table: &str,
        ) -> Result<Box<dyn BulkImportSession>> {
            unimplemented!("not used by the insert-into writer")
        }
    }

    fn create_test_payload() -> Payload {
        Payload::try_new(
            vec!["a".into(), "b".into()],
            vec![vec![Value::Int(1), Value::Float(2.5)]],
        )
        .unwrap()
    }

    fn table_for(client: Arc<MockClient>) -> Table {
        Table::new("sample", "orders", client)
    }

    #[test]
    fn test_absent_table_created_with_inferred_schema() {
        let client = MockClient::new(false);
        let table = table_for(client.clone());

        InsertIntoWriter::new()
            .write(create_test_payload(), &table, WriteMode::Error)
            .unwrap();

        let calls = client.calls();
        assert_eq!(
            calls[0],
            Call::Create(Some(vec![
                ("a".to_string(), SqlType::Bigint),
                ("b".to_string(), SqlType::Double),
            ]))
        );
        assert_eq!(
            calls[1],
            Call::Query("INSERT INTO sample.orders (a, b) VALUES (1, 2.5)".to_string())
        );
    }

    #[test]
    fn test_error_mode_on_existing_table_fails_without_mutation() {
        let client = MockClient::new(true);
        let table = table_for(client.clone());

        let err = InsertIntoWriter::new()
            .write(create_test_payload(), &table, WriteMode::Error)
            .unwrap_err();

        assert!(matches!(err, Error::TableExists { .. }));
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_ignore_mode_on_existing_table_is_noop() {
        let client = MockClient::new(true);
        let table = table_for(client.clone());

        InsertIntoWriter::new()
            .write(create_test_payload(), &table, WriteMode::Ignore)
            .unwrap();

        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_append_mode_skips_schema_changes() {
        let client = MockClient::new(true);
        let table = table_for(client.clone());

        InsertIntoWriter::new()
            .write(create_test_payload(), &table, WriteMode::Append)
            .unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Query(_)));
    }

    #[test]
    fn test_overwrite_deletes_then_recreates() {
        let client = MockClient::new(true);
        let table = table_for(client.clone());

        InsertIntoWriter::new()
            .write(create_test_payload(), &table, WriteMode::Overwrite)
            .unwrap();

        let calls = client.calls();
        assert_eq!(calls[0], Call::Delete);
        assert!(matches!(calls[1], Call::Create(Some(_))));
        assert!(matches!(calls[2], Call::Query(_)));
    }

    #[test]
    fn test_object_values_stringified_and_quoted() {
        let client = MockClient::new(false);
        let table = table_for(client.clone());

        let payload = Payload::try_new(
            vec!["name".into()],
            vec![
                vec![Value::Text("o'brien".into())],
                vec![Value::Int(7)],
            ],
        )
        .unwrap();

        InsertIntoWriter::new()
            .write(payload, &table, WriteMode::Error)
            .unwrap();

        let calls = client.calls();
        assert_eq!(
            calls[1],
            Call::Query(
                "INSERT INTO sample.orders (name) VALUES ('o\"brien'), ('7')".to_string()
            )
        );
    }

    #[test]
    fn test_empty_payload_rejected_before_any_mutation() {
        let client = MockClient::new(false);
        let table = table_for(client.clone());

        let payload = Payload::try_new(vec!["a".into()], vec![]).unwrap();
        let err = InsertIntoWriter::new()
            .write(payload, &table, WriteMode::Error)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(client.calls().is_empty());
    }
}
