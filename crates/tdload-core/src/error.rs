//! Error types for the tdload core library.
//!
//! One flat taxonomy following the thiserror pattern: invalid arguments and
//! precondition failures raise before any side effect; remote failures are
//! wrapped with their original message after best-effort cleanup. No variant
//! is retried automatically by this layer.

use thiserror::Error;

/// Result type alias for tdload operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for tdload.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid caller input (unknown writer name, bad conflict mode, malformed payload)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Destination table already exists under the `error` conflict mode
    #[error("target table {database}.{table} already exists")]
    TableExists { database: String, table: String },

    /// Conflict mode not supported by the selected writer
    #[error("conflict mode `{mode}` is not supported by the {writer} writer")]
    UnsupportedMode { mode: String, writer: &'static str },

    /// A different (apikey, endpoint) identity was presented to an open engine session
    #[error(
        "table handle and engine session have different apikey and/or endpoint; \
         create a new spark writer instance"
    )]
    SessionMismatch,

    /// Missing local artifact or unregistered backend
    #[error("not found: {0}")]
    NotFound(String),

    /// Remote permission failure
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Remote protocol failure (upload, perform, launch, download)
    #[error("remote operation failed: {0}")]
    Remote(String),

    /// Protocol run reported success but zero records landed
    #[error("no records have been imported: {session}")]
    NoRecordsImported { session: String },

    /// Payload serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Conversion implementations for external error types

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TableExists {
            database: "sample".into(),
            table: "orders".into(),
        };
        assert_eq!(err.to_string(), "target table sample.orders already exists");

        let err = Error::UnsupportedMode {
            mode: "append".into(),
            writer: "bulk_import",
        };
        assert!(err.to_string().contains("append"));
        assert!(err.to_string().contains("bulk_import"));
    }

    #[test]
    fn test_no_records_imported_names_session() {
        let err = Error::NoRecordsImported {
            session: "session-1700000000".into(),
        };
        assert!(err.to_string().contains("session-1700000000"));
    }

    #[test]
    fn test_csv_error_converts_to_serialization() {
        let mut w = csv::Writer::from_writer(vec![]);
        w.write_record(["a"]).unwrap();
        let csv_err = w.write_record(["a", "b"]).unwrap_err();
        let err: Error = csv_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
