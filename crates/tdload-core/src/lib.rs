//! tdload core - upload strategies for a cloud data warehouse
//!
//! This library pushes tabular data (in-memory payloads or CSV files) into a
//! warehouse table through one of three interchangeable writers:
//!
//! - `insert_into` - renders rows as one batched SQL INSERT statement
//! - `bulk_import` - stages rows to a CSV file and drives the session-oriented
//!   bulk-import protocol (create, upload, freeze, perform, commit)
//! - `spark` - bridges to an external distributed compute engine through a
//!   lazily-created, memoized session
//!
//! All three honor one contract: fresh existence checks before any
//! create/delete decision, a shared conflict-mode vocabulary, and best-effort
//! cleanup on partial failure. The warehouse itself is reached through the
//! narrow capabilities in [`client`]; nothing in this crate retries on its
//! own - callers decide retry policy.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod payload;
pub mod table;
pub mod writer;

// Re-export commonly used types
pub use client::{BulkImportSession, QueryEngine, WarehouseClient};
pub use config::{Config, SparkConfig};
pub use error::{Error, Result};
pub use payload::{ColumnDef, Payload, SqlType, Value};
pub use table::Table;
pub use writer::{WriteMode, Writer};
